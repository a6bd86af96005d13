use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::identity::Email;

use super::credentials::PasswordHash;

/// Stored job seeker account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerAccount {
    pub id: String,
    pub name: String,
    pub email: Email,
    pub password: PasswordHash,
    pub age: Option<u8>,
    pub location: String,
    pub linkedin: String,
    pub bio: String,
    pub registered_at: DateTime<Utc>,
}

impl SeekerAccount {
    pub fn profile(&self) -> SeekerProfile {
        SeekerProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            location: self.location.clone(),
            linkedin: self.linkedin.clone(),
            bio: self.bio.clone(),
            registered_at: self.registered_at,
        }
    }
}

/// Stored employer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerAccount {
    pub id: String,
    pub email: Email,
    pub password: PasswordHash,
    pub company: String,
    pub registered_at: DateTime<Utc>,
}

impl EmployerAccount {
    pub fn profile(&self) -> EmployerProfile {
        EmployerProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            registered_at: self.registered_at,
        }
    }
}

/// Public view of a seeker; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerProfile {
    pub id: String,
    pub name: String,
    pub email: Email,
    pub age: Option<u8>,
    pub location: String,
    pub linkedin: String,
    pub bio: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub id: String,
    pub email: Email,
    pub company: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerRegistration {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerRegistration {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, alias = "companyName")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Partial profile edit; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerProfileUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl SeekerProfileUpdate {
    pub(crate) fn apply_to(self, account: &mut SeekerAccount) {
        if let Some(name) = self.name.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            account.name = name;
        }
        if self.age.is_some() {
            account.age = self.age;
        }
        if let Some(location) = self.location {
            account.location = location.trim().to_string();
        }
        if let Some(linkedin) = self.linkedin {
            account.linkedin = linkedin.trim().to_string();
        }
        if let Some(bio) = self.bio {
            account.bio = bio.trim().to_string();
        }
    }
}
