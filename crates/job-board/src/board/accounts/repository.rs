use crate::board::identity::Email;
use crate::board::repository::RepositoryError;

use super::domain::{EmployerAccount, SeekerAccount};

/// Seeker and employer collections, each unique by e-mail.
pub trait AccountRepository: Send + Sync {
    /// Fails with `Conflict` when the e-mail is already registered.
    fn insert_seeker(&self, account: SeekerAccount) -> Result<SeekerAccount, RepositoryError>;
    fn fetch_seeker(&self, email: &Email) -> Result<Option<SeekerAccount>, RepositoryError>;
    fn update_seeker(&self, account: SeekerAccount) -> Result<SeekerAccount, RepositoryError>;
    fn insert_employer(&self, account: EmployerAccount)
        -> Result<EmployerAccount, RepositoryError>;
    fn fetch_employer(&self, email: &Email) -> Result<Option<EmployerAccount>, RepositoryError>;
}
