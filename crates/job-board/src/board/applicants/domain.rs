use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::identity::{Email, JobId};

/// The (job, seeker) pair every application and interview is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantKey {
    pub job_id: JobId,
    pub seeker_email: Email,
}

impl ApplicantKey {
    pub fn new(job_id: JobId, seeker_email: Email) -> Self {
        Self {
            job_id,
            seeker_email,
        }
    }

    /// Builds a key from raw request fields, naming the first one that is missing.
    pub fn parse(
        job_id: Option<&str>,
        seeker_email: Option<&str>,
        email_field: &str,
    ) -> Result<Self, String> {
        let job_id = job_id
            .and_then(JobId::parse)
            .ok_or_else(|| "jobId is required".to_string())?;
        let raw_email = seeker_email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("{email_field} is required"))?;
        let seeker_email = Email::parse(raw_email)
            .ok_or_else(|| format!("{email_field} '{raw_email}' is not an e-mail address"))?;
        Ok(Self::new(job_id, seeker_email))
    }
}

impl fmt::Display for ApplicantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on job {}", self.seeker_email, self.job_id)
    }
}

/// Lifecycle position of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "applied")]
    Applied,
    #[serde(rename = "interview scheduled")]
    InterviewScheduled,
    #[serde(rename = "rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::InterviewScheduled => "interview scheduled",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == '_' || c == '-', " ");

        match normalized.as_str() {
            "applied" => Some(ApplicationStatus::Applied),
            "interview scheduled" => Some(ApplicationStatus::InterviewScheduled),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Whether an interview record must exist for an application in this status.
    pub const fn requires_interview(self) -> bool {
        matches!(self, ApplicationStatus::InterviewScheduled)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Durable record of a seeker's application to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub seeker_email: Email,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn key(&self) -> ApplicantKey {
        ApplicantKey::new(self.job_id.clone(), self.seeker_email.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewMode {
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "In-Person")]
    InPerson,
    #[serde(rename = "Phone")]
    Phone,
}

impl InterviewMode {
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "online" | "video" | "remote" => Some(InterviewMode::Online),
            "inperson" | "onsite" | "offline" => Some(InterviewMode::InPerson),
            "phone" | "call" => Some(InterviewMode::Phone),
            _ => None,
        }
    }
}

/// Validated scheduling details for an interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewDetails {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub mode: InterviewMode,
    pub link: Option<String>,
    pub message: Option<String>,
}

/// Scheduling details created when an employer accepts an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: String,
    pub job_id: JobId,
    pub seeker_email: Email,
    pub interview_date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub interview_time: NaiveTime,
    pub mode: InterviewMode,
    pub link: Option<String>,
    pub message: Option<String>,
    pub scheduled_at: DateTime<Utc>,
}

impl InterviewRecord {
    pub fn key(&self) -> ApplicantKey {
        ApplicantKey::new(self.job_id.clone(), self.seeker_email.clone())
    }

    pub fn details(&self) -> InterviewDetails {
        InterviewDetails {
            date: self.interview_date,
            time: self.interview_time,
            mode: self.mode,
            link: self.link.clone(),
            message: self.message.clone(),
        }
    }
}

/// Body of `POST /apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl ApplyRequest {
    pub fn key(&self) -> Result<ApplicantKey, String> {
        ApplicantKey::parse(
            self.job_id.as_deref(),
            self.user_email.as_deref(),
            "userEmail",
        )
    }
}

/// Raw interview slot as submitted by the employer client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSlot {
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub interview_time: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InterviewSlot {
    pub fn details(&self) -> Result<InterviewDetails, String> {
        let raw_date = present(self.interview_date.as_deref()).ok_or("interviewDate is required")?;
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| format!("interviewDate '{raw_date}' must be YYYY-MM-DD"))?;

        let raw_time = present(self.interview_time.as_deref()).ok_or("interviewTime is required")?;
        let time = NaiveTime::parse_from_str(raw_time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw_time, "%H:%M:%S"))
            .map_err(|_| format!("interviewTime '{raw_time}' must be HH:MM"))?;

        let raw_mode = present(self.mode.as_deref()).ok_or("mode is required")?;
        let mode =
            InterviewMode::parse(raw_mode).ok_or_else(|| format!("unknown interview mode '{raw_mode}'"))?;

        Ok(InterviewDetails {
            date,
            time,
            mode,
            link: present(self.link.as_deref()).map(str::to_string),
            message: present(self.message.as_deref()).map(str::to_string),
        })
    }
}

/// Body of `POST /interviews`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub seeker_email: Option<String>,
    #[serde(flatten)]
    pub slot: InterviewSlot,
}

impl InterviewRequest {
    pub fn key(&self) -> Result<ApplicantKey, String> {
        ApplicantKey::parse(
            self.job_id.as_deref(),
            self.seeker_email.as_deref(),
            "seekerEmail",
        )
    }
}

/// Body of `PUT /applicant/status`. Scheduling through this route needs `interview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub interview: Option<InterviewSlot>,
}

/// `jobId` + `email` pair used by the delete/withdraw routes, from query or body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSelector {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ApplicantSelector {
    pub fn key(&self) -> Result<ApplicantKey, String> {
        ApplicantKey::parse(self.job_id.as_deref(), self.email.as_deref(), "email")
    }
}

/// An application joined with its interview, when one is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    pub interview_details: Option<InterviewRecord>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> InterviewSlot {
        InterviewSlot {
            interview_date: Some("2024-05-01".to_string()),
            interview_time: Some("10:00".to_string()),
            mode: Some("Online".to_string()),
            link: Some("https://meet.example/abc".to_string()),
            message: Some("   ".to_string()),
        }
    }

    #[test]
    fn status_labels_match_wire_values() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewScheduled).expect("json");
        assert_eq!(json, "\"interview scheduled\"");
        assert_eq!(
            ApplicationStatus::parse("Interview_Scheduled"),
            Some(ApplicationStatus::InterviewScheduled)
        );
        assert_eq!(ApplicationStatus::parse("hired"), None);
    }

    #[test]
    fn slot_parses_into_details_and_drops_blank_message() {
        let details = slot().details().expect("valid slot");
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"));
        assert_eq!(details.time, NaiveTime::from_hms_opt(10, 0, 0).expect("time"));
        assert_eq!(details.mode, InterviewMode::Online);
        assert_eq!(details.link.as_deref(), Some("https://meet.example/abc"));
        assert_eq!(details.message, None);
    }

    #[test]
    fn slot_names_the_missing_field() {
        let mut missing_time = slot();
        missing_time.interview_time = None;
        assert_eq!(
            missing_time.details().expect_err("no time"),
            "interviewTime is required"
        );

        let mut bad_date = slot();
        bad_date.interview_date = Some("01/05/2024".to_string());
        assert!(bad_date.details().expect_err("bad date").contains("YYYY-MM-DD"));

        let mut bad_mode = slot();
        bad_mode.mode = Some("carrier pigeon".to_string());
        assert!(bad_mode.details().expect_err("bad mode").contains("carrier pigeon"));
    }

    #[test]
    fn interview_modes_accept_common_spellings() {
        assert_eq!(InterviewMode::parse("in-person"), Some(InterviewMode::InPerson));
        assert_eq!(InterviewMode::parse("On-site"), Some(InterviewMode::InPerson));
        assert_eq!(InterviewMode::parse("PHONE"), Some(InterviewMode::Phone));
    }

    #[test]
    fn apply_request_requires_both_fields() {
        let missing_email = ApplyRequest {
            job_id: Some("J1".to_string()),
            user_email: None,
        };
        assert_eq!(missing_email.key().expect_err("missing"), "userEmail is required");

        let missing_job = ApplyRequest {
            job_id: Some(" ".to_string()),
            user_email: Some("a@x.com".to_string()),
        };
        assert_eq!(missing_job.key().expect_err("missing"), "jobId is required");
    }

    #[test]
    fn interview_request_reads_flattened_camel_case_body() {
        let body = serde_json::json!({
            "jobId": "J1",
            "seekerEmail": "A@X.com",
            "interviewDate": "2024-05-01",
            "interviewTime": "10:00",
            "mode": "Online",
            "link": "https://meet.example/abc",
        });
        let request: InterviewRequest = serde_json::from_value(body).expect("deserialize");
        let key = request.key().expect("key");
        assert_eq!(key.seeker_email.as_str(), "a@x.com");
        assert_eq!(request.slot.details().expect("details").mode, InterviewMode::Online);
    }

    #[test]
    fn interview_time_serializes_as_hour_minute() {
        let record = InterviewRecord {
            id: "interview-1".to_string(),
            job_id: JobId("J1".to_string()),
            seeker_email: Email::parse("a@x.com").expect("email"),
            interview_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
            interview_time: NaiveTime::from_hms_opt(9, 30, 0).expect("time"),
            mode: InterviewMode::InPerson,
            link: None,
            message: None,
            scheduled_at: DateTime::<Utc>::from_timestamp(0, 0).expect("epoch"),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["interviewTime"], "09:30");
        assert_eq!(value["mode"], "In-Person");
        assert_eq!(value["interviewDate"], "2024-05-01");
    }
}
