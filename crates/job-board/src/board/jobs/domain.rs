use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::identity::{Email, JobId};

/// Employment arrangement advertised on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
    #[serde(rename = "Internship")]
    Internship,
    #[serde(rename = "Remote")]
    Remote,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Internship => "Internship",
            JobType::Remote => "Remote",
        }
    }

    /// Lenient parse used for request bodies and CSV rows ("full-time", "Full Time", ...).
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "fulltime" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "internship" | "intern" => Some(JobType::Internship),
            "remote" => Some(JobType::Remote),
            _ => None,
        }
    }
}

/// A published job posting. Owned by the employer in `posted_by`, by reference only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary: String,
    pub description: String,
    pub posted_by: Email,
    pub posted_at: DateTime<Utc>,
}

/// Unvalidated create/edit payload. Every field is optional so missing input
/// surfaces as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_by: Option<String>,
}

/// Editable fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JobFields {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: String,
    pub(crate) job_type: JobType,
    pub(crate) salary: String,
    pub(crate) description: String,
}

impl JobFields {
    pub(crate) fn apply_to(self, posting: &mut JobPosting) {
        posting.title = self.title;
        posting.company = self.company;
        posting.location = self.location;
        posting.job_type = self.job_type;
        posting.salary = self.salary;
        posting.description = self.description;
    }
}

impl JobDraft {
    pub(crate) fn fields(&self) -> Result<JobFields, String> {
        let title = required(&self.title, "title")?;
        let company = required(&self.company, "company")?;
        let job_type = match self.job_type.as_deref().map(str::trim) {
            None | Some("") => JobType::FullTime,
            Some(raw) => JobType::parse(raw).ok_or_else(|| format!("unknown job type '{raw}'"))?,
        };

        Ok(JobFields {
            title,
            company,
            location: optional(&self.location),
            job_type,
            salary: optional(&self.salary),
            description: optional(&self.description),
        })
    }

    pub(crate) fn poster(&self) -> Result<Email, String> {
        let raw = required(&self.posted_by, "postedBy")?;
        Email::parse(&raw).ok_or_else(|| format!("postedBy '{raw}' is not an e-mail address"))
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(format!("{field} is required")),
    }
}

fn optional(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobDraft {
        JobDraft {
            title: Some(" Backend Engineer ".to_string()),
            company: Some("Acme".to_string()),
            location: None,
            job_type: Some("part-time".to_string()),
            salary: Some("80k".to_string()),
            description: None,
            posted_by: Some("HR@Acme.io".to_string()),
        }
    }

    #[test]
    fn fields_trim_and_default_optional_values() {
        let fields = draft().fields().expect("valid draft");
        assert_eq!(fields.title, "Backend Engineer");
        assert_eq!(fields.job_type, JobType::PartTime);
        assert_eq!(fields.location, "");
    }

    #[test]
    fn missing_type_defaults_to_full_time() {
        let mut draft = draft();
        draft.job_type = None;
        assert_eq!(draft.fields().expect("valid").job_type, JobType::FullTime);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut draft = draft();
        draft.job_type = Some("gig".to_string());
        let err = draft.fields().expect_err("gig is not a job type");
        assert!(err.contains("gig"));
    }

    #[test]
    fn blank_company_is_rejected() {
        let mut draft = draft();
        draft.company = Some("   ".to_string());
        assert_eq!(draft.fields().expect_err("blank"), "company is required");
    }

    #[test]
    fn poster_is_normalized() {
        assert_eq!(draft().poster().expect("email").as_str(), "hr@acme.io");
    }

    #[test]
    fn job_type_serializes_with_display_labels() {
        let json = serde_json::to_string(&JobType::FullTime).expect("serialize");
        assert_eq!(json, "\"Full Time\"");
        assert_eq!(JobType::parse("Internship"), Some(JobType::Internship));
        assert_eq!(JobType::Remote.label(), "Remote");
    }
}
