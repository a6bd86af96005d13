use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn generate() -> Self {
        Self(format!("job-{}", Uuid::new_v4().simple()))
    }

    /// Accepts any non-blank identifier; the store treats it as an opaque key.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account e-mail, trimmed and lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Some(Self(normalized))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates a prefixed record identifier (`application-…`, `interview-…`).
pub(crate) fn record_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let email = Email::parse("  A@X.com ").expect("valid email");
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn email_requires_both_halves() {
        assert!(Email::parse("").is_none());
        assert!(Email::parse("no-at-sign").is_none());
        assert!(Email::parse("@x.com").is_none());
        assert!(Email::parse("a@").is_none());
    }

    #[test]
    fn blank_job_id_is_rejected() {
        assert!(JobId::parse("   ").is_none());
        assert_eq!(JobId::parse(" J1 ").map(|id| id.0), Some("J1".to_string()));
    }

    #[test]
    fn generated_job_ids_are_prefixed_and_unique() {
        let first = JobId::generate();
        let second = JobId::generate();
        assert!(first.as_str().starts_with("job-"));
        assert_ne!(first, second);
    }
}
