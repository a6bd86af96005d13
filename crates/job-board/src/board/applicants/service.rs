use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, info, warn};

use crate::board::clock::{Clock, SystemClock};
use crate::board::identity::{record_id, Email, JobId};
use crate::board::repository::RepositoryError;

use super::domain::{
    ApplicantKey, ApplicantView, ApplicationRecord, ApplicationStatus, ApplyRequest,
    InterviewDetails, InterviewRecord, InterviewRequest, StatusUpdateRequest,
};
use super::repository::{ApplicantRepository, UnitOfWork};

/// Mediates apply, schedule, reject, and withdraw so an application's status always
/// agrees with whether an interview exists for it.
pub struct ApplicantLifecycleService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ApplicantLifecycleService<S>
where
    S: ApplicantRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a new application in the `applied` state.
    pub fn apply(&self, request: ApplyRequest) -> Result<ApplicationRecord, LifecycleError> {
        let key = request.key().map_err(LifecycleError::InvalidInput)?;
        let now = self.clock.now();

        let record = ApplicationRecord {
            id: record_id("application"),
            seeker_email: key.seeker_email.clone(),
            job_id: key.job_id.clone(),
            status: ApplicationStatus::Applied,
            applied_at: now,
            updated_at: now,
        };

        match self.store.insert_application(record) {
            Ok(stored) => {
                info!(job_id = %key.job_id, email = %key.seeker_email, "application received");
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => Err(LifecycleError::DuplicateApplication(key)),
            Err(other) => Err(store_failure(other)),
        }
    }

    /// Applications for a job ordered by `applied_at`, each joined with its interview.
    pub fn list_applicants(&self, job_id: &JobId) -> Result<Vec<ApplicantView>, LifecycleError> {
        let mut applications = self
            .store
            .applications_for_job(job_id)
            .map_err(store_failure)?;
        let mut interviews: HashMap<Email, InterviewRecord> = self
            .store
            .interviews_for_job(job_id)
            .map_err(store_failure)?
            .into_iter()
            .map(|interview| (interview.seeker_email.clone(), interview))
            .collect();

        applications.sort_by(|a, b| {
            a.applied_at
                .cmp(&b.applied_at)
                .then_with(|| a.seeker_email.cmp(&b.seeker_email))
        });

        let views = applications
            .into_iter()
            .map(|application| {
                let interview = interviews.remove(&application.seeker_email);
                let interview_details = if application.status.requires_interview() {
                    if interview.is_none() {
                        warn!(
                            job_id = %job_id,
                            email = %application.seeker_email,
                            "scheduled application has no interview record"
                        );
                    }
                    interview
                } else {
                    if interview.is_some() {
                        warn!(
                            job_id = %job_id,
                            email = %application.seeker_email,
                            status = %application.status,
                            "interview record present for unscheduled application"
                        );
                    }
                    None
                };

                ApplicantView {
                    application,
                    interview_details,
                }
            })
            .collect();

        Ok(views)
    }

    /// Parses an interview request and schedules it.
    pub fn schedule(&self, request: InterviewRequest) -> Result<InterviewRecord, LifecycleError> {
        let key = request.key().map_err(LifecycleError::InvalidInput)?;
        let details = request
            .slot
            .details()
            .map_err(LifecycleError::InvalidInput)?;
        self.schedule_interview(key, details)
    }

    /// Writes the interview and flips the status in one unit of work. Scheduling an
    /// already scheduled application replaces its interview.
    pub fn schedule_interview(
        &self,
        key: ApplicantKey,
        details: InterviewDetails,
    ) -> Result<InterviewRecord, LifecycleError> {
        let current = self.require_application(&key)?;
        if current.status == ApplicationStatus::Rejected {
            return Err(LifecycleError::InvalidTransition {
                from: current.status,
                to: ApplicationStatus::InterviewScheduled,
            });
        }

        let now = self.clock.now();
        let interview = InterviewRecord {
            id: record_id("interview"),
            job_id: key.job_id.clone(),
            seeker_email: key.seeker_email.clone(),
            interview_date: details.date,
            interview_time: details.time,
            mode: details.mode,
            link: details.link,
            message: details.message,
            scheduled_at: now,
        };
        let rescheduled = current.status == ApplicationStatus::InterviewScheduled;
        let previous_status = current.status;
        let updated = ApplicationRecord {
            status: ApplicationStatus::InterviewScheduled,
            updated_at: now,
            ..current
        };

        let unit = UnitOfWork::new(key.clone())
            .expect_status(previous_status)
            .put_interview(interview.clone())
            .put_application(updated);
        self.commit(unit)?;

        info!(
            job_id = %key.job_id,
            email = %key.seeker_email,
            date = %interview.interview_date,
            rescheduled,
            "interview scheduled"
        );
        Ok(interview)
    }

    /// Marks the application `rejected` in place and drops any interview for it.
    pub fn reject(&self, key: ApplicantKey) -> Result<ApplicationRecord, LifecycleError> {
        let current = self.require_application(&key)?;
        if current.status == ApplicationStatus::Rejected {
            return Ok(current);
        }

        let previous_status = current.status;
        let updated = ApplicationRecord {
            status: ApplicationStatus::Rejected,
            updated_at: self.clock.now(),
            ..current
        };

        let unit = UnitOfWork::new(key.clone())
            .expect_status(previous_status)
            .put_application(updated.clone())
            .delete_interview();
        self.commit(unit)?;

        info!(
            job_id = %key.job_id,
            email = %key.seeker_email,
            previous = %previous_status,
            "application rejected"
        );
        Ok(updated)
    }

    /// Deletes the application and any interview. Returns whether an application existed.
    pub fn withdraw(&self, key: ApplicantKey) -> Result<bool, LifecycleError> {
        let existed = self
            .store
            .fetch_application(&key)
            .map_err(store_failure)?
            .is_some();

        let unit = UnitOfWork::new(key.clone())
            .delete_application()
            .delete_interview();
        self.commit(unit)?;

        if existed {
            info!(job_id = %key.job_id, email = %key.seeker_email, "application withdrawn");
        }
        Ok(existed)
    }

    /// Status change requested through the generic status route.
    pub fn update_status(
        &self,
        request: StatusUpdateRequest,
    ) -> Result<ApplicantView, LifecycleError> {
        let key = ApplicantKey::parse(
            request.job_id.as_deref(),
            request.email.as_deref(),
            "email",
        )
        .map_err(LifecycleError::InvalidInput)?;
        let raw_status = request
            .status
            .as_deref()
            .ok_or_else(|| LifecycleError::InvalidInput("status is required".to_string()))?;
        let status = ApplicationStatus::parse(raw_status).ok_or_else(|| {
            LifecycleError::InvalidInput(format!("unknown application status '{raw_status}'"))
        })?;

        match status {
            ApplicationStatus::Rejected => {
                let application = self.reject(key)?;
                Ok(ApplicantView {
                    application,
                    interview_details: None,
                })
            }
            ApplicationStatus::InterviewScheduled => {
                if let Some(slot) = request.interview.as_ref() {
                    let details = slot.details().map_err(LifecycleError::InvalidInput)?;
                    self.schedule_interview(key.clone(), details)?;
                }

                let application = self.require_application(&key)?;
                if application.status != ApplicationStatus::InterviewScheduled {
                    return Err(LifecycleError::InvalidInput(
                        "interview details are required to schedule an interview".to_string(),
                    ));
                }
                let interview_details = self.store.fetch_interview(&key).map_err(store_failure)?;
                Ok(ApplicantView {
                    application,
                    interview_details,
                })
            }
            ApplicationStatus::Applied => Err(LifecycleError::InvalidInput(
                "applications cannot be moved back to applied".to_string(),
            )),
        }
    }

    /// Interviews for a job in calendar order.
    pub fn interviews_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<InterviewRecord>, LifecycleError> {
        let mut interviews = self
            .store
            .interviews_for_job(job_id)
            .map_err(store_failure)?;
        interviews.sort_by(|a, b| {
            (a.interview_date, a.interview_time, &a.seeker_email).cmp(&(
                b.interview_date,
                b.interview_time,
                &b.seeker_email,
            ))
        });
        Ok(interviews)
    }

    /// A seeker's applications, most recent first.
    pub fn applications_for_seeker(
        &self,
        email: &Email,
    ) -> Result<Vec<ApplicationRecord>, LifecycleError> {
        let mut applications = self
            .store
            .applications_for_seeker(email)
            .map_err(store_failure)?;
        applications.sort_by(|a, b| {
            b.applied_at
                .cmp(&a.applied_at)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });
        Ok(applications)
    }

    fn require_application(&self, key: &ApplicantKey) -> Result<ApplicationRecord, LifecycleError> {
        self.store
            .fetch_application(key)
            .map_err(store_failure)?
            .ok_or_else(|| LifecycleError::NotFound(key.clone()))
    }

    fn commit(&self, unit: UnitOfWork) -> Result<(), LifecycleError> {
        let key = unit.key().clone();
        match self.store.commit(unit) {
            Ok(()) => Ok(()),
            Err(RepositoryError::PreconditionFailed) => {
                warn!(job_id = %key.job_id, email = %key.seeker_email, "concurrent applicant update");
                Err(LifecycleError::ConcurrentModification(key))
            }
            Err(RepositoryError::NotFound) => Err(LifecycleError::NotFound(key)),
            Err(other) => Err(store_failure(other)),
        }
    }
}

fn store_failure(err: RepositoryError) -> LifecycleError {
    error!(error = %err, "applicant store failure");
    LifecycleError::StoreUnavailable(err.to_string())
}

/// Error raised by the applicant lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} has already applied")]
    DuplicateApplication(ApplicantKey),
    #[error("no application found for {0}")]
    NotFound(ApplicantKey),
    #[error("cannot move a {from} application to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("application for {0} changed while it was being updated")]
    ConcurrentModification(ApplicantKey),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LifecycleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LifecycleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LifecycleError::DuplicateApplication(_)
            | LifecycleError::InvalidTransition { .. }
            | LifecycleError::ConcurrentModification(_) => StatusCode::CONFLICT,
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
