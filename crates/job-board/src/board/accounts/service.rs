use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, info, warn};

use crate::board::clock::{Clock, SystemClock};
use crate::board::identity::{record_id, Email};
use crate::board::repository::RepositoryError;

use super::credentials::PasswordHash;
use super::domain::{
    EmployerAccount, EmployerProfile, EmployerRegistration, LoginRequest, SeekerAccount,
    SeekerProfile, SeekerProfileUpdate, SeekerRegistration,
};
use super::repository::AccountRepository;

const MIN_PASSWORD_LEN: usize = 8;

/// Registration, credential checks, and seeker profile maintenance.
pub struct AccountService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn register_seeker(
        &self,
        registration: SeekerRegistration,
    ) -> Result<SeekerProfile, AccountServiceError> {
        let name = required(registration.name.as_deref(), "name")?;
        let email = parse_email(registration.email.as_deref())?;
        let password = password(registration.password.as_deref())?;

        let account = SeekerAccount {
            id: record_id("seeker"),
            name,
            email: email.clone(),
            password: PasswordHash::new(password).map_err(hashing_failure)?,
            age: registration.age,
            location: trimmed(registration.location),
            linkedin: trimmed(registration.linkedin),
            bio: trimmed(registration.bio),
            registered_at: self.clock.now(),
        };

        let stored = self
            .repository
            .insert_seeker(account)
            .map_err(|err| registration_failure(err, &email))?;
        info!(email = %stored.email, "seeker registered");
        Ok(stored.profile())
    }

    pub fn authenticate_seeker(
        &self,
        login: LoginRequest,
    ) -> Result<SeekerProfile, AccountServiceError> {
        let (email, password) = credentials(&login)?;
        let account = self
            .repository
            .fetch_seeker(&email)
            .map_err(store_failure)?;

        match account {
            Some(account) if account.password.verify(password) => Ok(account.profile()),
            _ => {
                warn!(email = %email, "seeker login rejected");
                Err(AccountServiceError::InvalidCredentials)
            }
        }
    }

    pub fn seeker_profile(&self, email: &Email) -> Result<SeekerProfile, AccountServiceError> {
        self.repository
            .fetch_seeker(email)
            .map_err(store_failure)?
            .map(|account| account.profile())
            .ok_or_else(|| AccountServiceError::NotFound(email.clone()))
    }

    pub fn update_seeker_profile(
        &self,
        update: SeekerProfileUpdate,
    ) -> Result<SeekerProfile, AccountServiceError> {
        let email = parse_email(update.email.as_deref())?;
        let mut account = self
            .repository
            .fetch_seeker(&email)
            .map_err(store_failure)?
            .ok_or_else(|| AccountServiceError::NotFound(email.clone()))?;

        update.apply_to(&mut account);

        match self.repository.update_seeker(account) {
            Ok(stored) => {
                info!(email = %stored.email, "seeker profile updated");
                Ok(stored.profile())
            }
            Err(RepositoryError::NotFound) => Err(AccountServiceError::NotFound(email)),
            Err(other) => Err(store_failure(other)),
        }
    }

    pub fn register_employer(
        &self,
        registration: EmployerRegistration,
    ) -> Result<EmployerProfile, AccountServiceError> {
        let email = parse_email(registration.email.as_deref())?;
        let password = password(registration.password.as_deref())?;
        let company = required(registration.company.as_deref(), "company")?;

        let account = EmployerAccount {
            id: record_id("employer"),
            email: email.clone(),
            password: PasswordHash::new(password).map_err(hashing_failure)?,
            company,
            registered_at: self.clock.now(),
        };

        let stored = self
            .repository
            .insert_employer(account)
            .map_err(|err| registration_failure(err, &email))?;
        info!(email = %stored.email, company = %stored.company, "employer registered");
        Ok(stored.profile())
    }

    pub fn authenticate_employer(
        &self,
        login: LoginRequest,
    ) -> Result<EmployerProfile, AccountServiceError> {
        let (email, password) = credentials(&login)?;
        let account = self
            .repository
            .fetch_employer(&email)
            .map_err(store_failure)?;

        match account {
            Some(account) if account.password.verify(password) => Ok(account.profile()),
            _ => {
                warn!(email = %email, "employer login rejected");
                Err(AccountServiceError::InvalidCredentials)
            }
        }
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, AccountServiceError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(AccountServiceError::InvalidInput(format!(
            "{field} is required"
        ))),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_email(raw: Option<&str>) -> Result<Email, AccountServiceError> {
    let raw = required(raw, "email")?;
    Email::parse(&raw)
        .ok_or_else(|| AccountServiceError::InvalidInput(format!("'{raw}' is not an e-mail address")))
}

fn password(raw: Option<&str>) -> Result<&str, AccountServiceError> {
    match raw {
        Some(value) if value.chars().count() >= MIN_PASSWORD_LEN => Ok(value),
        Some(_) => Err(AccountServiceError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))),
        None => Err(AccountServiceError::InvalidInput(
            "password is required".to_string(),
        )),
    }
}

fn credentials(login: &LoginRequest) -> Result<(Email, &str), AccountServiceError> {
    let email = parse_email(login.email.as_deref())?;
    let password = login
        .password
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AccountServiceError::InvalidInput("password is required".to_string()))?;
    Ok((email, password))
}

fn registration_failure(err: RepositoryError, email: &Email) -> AccountServiceError {
    match err {
        RepositoryError::Conflict => AccountServiceError::EmailTaken(email.clone()),
        other => store_failure(other),
    }
}

fn hashing_failure(err: argon2::password_hash::Error) -> AccountServiceError {
    error!(error = %err, "password hashing failed");
    AccountServiceError::Hashing(err.to_string())
}

fn store_failure(err: RepositoryError) -> AccountServiceError {
    error!(error = %err, "account store failure");
    AccountServiceError::Repository(err)
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("invalid account request: {0}")]
    InvalidInput(String),
    #[error("{0} is already registered")]
    EmailTaken(Email),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no account registered for {0}")]
    NotFound(Email),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AccountServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AccountServiceError::EmailTaken(_) => StatusCode::CONFLICT,
            AccountServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountServiceError::Hashing(_) | AccountServiceError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
