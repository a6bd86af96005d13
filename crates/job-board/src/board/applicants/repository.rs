use std::collections::BTreeMap;

use crate::board::identity::{Email, JobId};
use crate::board::repository::RepositoryError;

use super::domain::{ApplicantKey, ApplicationRecord, ApplicationStatus, InterviewRecord};

/// A single write inside a [`UnitOfWork`]. Every write targets the unit's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    PutApplication(ApplicationRecord),
    DeleteApplication,
    PutInterview(InterviewRecord),
    DeleteInterview,
}

/// Writes to one applicant's application and interview that commit together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOfWork {
    key: ApplicantKey,
    expected_status: Option<ApplicationStatus>,
    writes: Vec<StoreWrite>,
}

impl UnitOfWork {
    pub fn new(key: ApplicantKey) -> Self {
        Self {
            key,
            expected_status: None,
            writes: Vec::new(),
        }
    }

    /// Commit only if the stored application still has `status`.
    pub fn expect_status(mut self, status: ApplicationStatus) -> Self {
        self.expected_status = Some(status);
        self
    }

    pub fn put_application(mut self, record: ApplicationRecord) -> Self {
        self.writes.push(StoreWrite::PutApplication(record));
        self
    }

    pub fn delete_application(mut self) -> Self {
        self.writes.push(StoreWrite::DeleteApplication);
        self
    }

    pub fn put_interview(mut self, record: InterviewRecord) -> Self {
        self.writes.push(StoreWrite::PutInterview(record));
        self
    }

    pub fn delete_interview(mut self) -> Self {
        self.writes.push(StoreWrite::DeleteInterview);
        self
    }

    pub fn key(&self) -> &ApplicantKey {
        &self.key
    }

    pub fn expected_status(&self) -> Option<ApplicationStatus> {
        self.expected_status
    }

    pub fn writes(&self) -> &[StoreWrite] {
        &self.writes
    }

    /// Checks the precondition and write scoping, then applies every write to the
    /// given collections. Nothing is touched when an error is returned, so stores
    /// holding both maps under one lock get all-or-nothing commits.
    pub fn apply(
        self,
        applications: &mut BTreeMap<ApplicantKey, ApplicationRecord>,
        interviews: &mut BTreeMap<ApplicantKey, InterviewRecord>,
    ) -> Result<(), RepositoryError> {
        if let Some(expected) = self.expected_status {
            match applications.get(&self.key) {
                Some(current) if current.status == expected => {}
                _ => return Err(RepositoryError::PreconditionFailed),
            }
        }

        let scoped = self.writes.iter().all(|write| match write {
            StoreWrite::PutApplication(record) => record.key() == self.key,
            StoreWrite::PutInterview(record) => record.key() == self.key,
            StoreWrite::DeleteApplication | StoreWrite::DeleteInterview => true,
        });
        if !scoped {
            return Err(RepositoryError::PreconditionFailed);
        }

        for write in self.writes {
            match write {
                StoreWrite::PutApplication(record) => {
                    applications.insert(self.key.clone(), record);
                }
                StoreWrite::DeleteApplication => {
                    applications.remove(&self.key);
                }
                StoreWrite::PutInterview(record) => {
                    interviews.insert(self.key.clone(), record);
                }
                StoreWrite::DeleteInterview => {
                    interviews.remove(&self.key);
                }
            }
        }

        Ok(())
    }
}

/// Storage abstraction over applications and interviews, both keyed by [`ApplicantKey`].
pub trait ApplicantRepository: Send + Sync {
    /// Fails with `Conflict` when an application already exists for the key.
    fn insert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch_application(
        &self,
        key: &ApplicantKey,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn applications_for_job(&self, job_id: &JobId)
        -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn applications_for_seeker(
        &self,
        email: &Email,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn fetch_interview(&self, key: &ApplicantKey)
        -> Result<Option<InterviewRecord>, RepositoryError>;
    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<InterviewRecord>, RepositoryError>;
    /// Applies the unit atomically.
    fn commit(&self, unit: UnitOfWork) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

    use crate::board::applicants::domain::InterviewMode;

    fn key(email: &str) -> ApplicantKey {
        ApplicantKey::new(
            JobId("J1".to_string()),
            Email::parse(email).expect("valid email"),
        )
    }

    fn application(email: &str, status: ApplicationStatus) -> ApplicationRecord {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).expect("timestamp");
        ApplicationRecord {
            id: format!("application-{email}"),
            seeker_email: Email::parse(email).expect("valid email"),
            job_id: JobId("J1".to_string()),
            status,
            applied_at: at,
            updated_at: at,
        }
    }

    fn interview(email: &str) -> InterviewRecord {
        InterviewRecord {
            id: format!("interview-{email}"),
            job_id: JobId("J1".to_string()),
            seeker_email: Email::parse(email).expect("valid email"),
            interview_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
            interview_time: NaiveTime::from_hms_opt(10, 0, 0).expect("time"),
            mode: InterviewMode::Online,
            link: None,
            message: None,
            scheduled_at: DateTime::<Utc>::from_timestamp(1_700_000_100, 0).expect("timestamp"),
        }
    }

    #[test]
    fn applies_all_writes_when_precondition_holds() {
        let mut applications = BTreeMap::new();
        let mut interviews = BTreeMap::new();
        applications.insert(key("a@x.com"), application("a@x.com", ApplicationStatus::Applied));

        UnitOfWork::new(key("a@x.com"))
            .expect_status(ApplicationStatus::Applied)
            .put_interview(interview("a@x.com"))
            .put_application(application("a@x.com", ApplicationStatus::InterviewScheduled))
            .apply(&mut applications, &mut interviews)
            .expect("commit succeeds");

        assert_eq!(
            applications[&key("a@x.com")].status,
            ApplicationStatus::InterviewScheduled
        );
        assert!(interviews.contains_key(&key("a@x.com")));
    }

    #[test]
    fn stale_precondition_leaves_collections_untouched() {
        let mut applications = BTreeMap::new();
        let mut interviews = BTreeMap::new();
        applications.insert(key("a@x.com"), application("a@x.com", ApplicationStatus::Rejected));

        let result = UnitOfWork::new(key("a@x.com"))
            .expect_status(ApplicationStatus::Applied)
            .put_interview(interview("a@x.com"))
            .put_application(application("a@x.com", ApplicationStatus::InterviewScheduled))
            .apply(&mut applications, &mut interviews);

        assert_eq!(result, Err(RepositoryError::PreconditionFailed));
        assert_eq!(applications[&key("a@x.com")].status, ApplicationStatus::Rejected);
        assert!(interviews.is_empty());
    }

    #[test]
    fn writes_for_another_applicant_are_refused() {
        let mut applications = BTreeMap::new();
        let mut interviews = BTreeMap::new();

        let result = UnitOfWork::new(key("a@x.com"))
            .put_interview(interview("b@x.com"))
            .apply(&mut applications, &mut interviews);

        assert_eq!(result, Err(RepositoryError::PreconditionFailed));
        assert!(interviews.is_empty());
    }

    #[test]
    fn deletes_are_tolerant_of_missing_records() {
        let mut applications = BTreeMap::new();
        let mut interviews = BTreeMap::new();

        UnitOfWork::new(key("a@x.com"))
            .delete_application()
            .delete_interview()
            .apply(&mut applications, &mut interviews)
            .expect("no-op commit");

        assert!(applications.is_empty() && interviews.is_empty());
    }
}
