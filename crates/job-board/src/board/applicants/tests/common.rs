use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::board::applicants::domain::{
    ApplicantKey, ApplicationRecord, ApplicationStatus, ApplyRequest, InterviewRecord,
    InterviewSlot,
};
use crate::board::applicants::repository::{ApplicantRepository, UnitOfWork};
use crate::board::applicants::service::ApplicantLifecycleService;
use crate::board::clock::Clock;
use crate::board::identity::{Email, JobId};
use crate::board::repository::RepositoryError;
use crate::board::store::DocumentStore;

/// Clock that advances one minute per reading so `applied_at` ordering is deterministic.
#[derive(Debug)]
pub(super) struct SteppingClock {
    minutes: AtomicI64,
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self {
            minutes: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let step = self.minutes.fetch_add(1, Ordering::SeqCst);
        DateTime::<Utc>::from_timestamp(1_714_550_400 + step * 60, 0).expect("valid timestamp")
    }
}

pub(super) fn build_service() -> (
    ApplicantLifecycleService<DocumentStore>,
    Arc<DocumentStore>,
) {
    let store = Arc::new(DocumentStore::in_memory());
    let service =
        ApplicantLifecycleService::with_clock(store.clone(), Arc::new(SteppingClock::default()));
    (service, store)
}

pub(super) fn job(id: &str) -> JobId {
    JobId(id.to_string())
}

pub(super) fn key(job_id: &str, email: &str) -> ApplicantKey {
    ApplicantKey::new(job(job_id), Email::parse(email).expect("valid email"))
}

pub(super) fn apply_request(job_id: &str, email: &str) -> ApplyRequest {
    ApplyRequest {
        job_id: Some(job_id.to_string()),
        user_email: Some(email.to_string()),
    }
}

pub(super) fn slot() -> InterviewSlot {
    InterviewSlot {
        interview_date: Some("2024-05-01".to_string()),
        interview_time: Some("10:00".to_string()),
        mode: Some("Online".to_string()),
        link: Some("https://meet.example/abc".to_string()),
        message: Some("Bring a portfolio".to_string()),
    }
}

pub(super) fn stored_status(store: &DocumentStore, key: &ApplicantKey) -> Option<ApplicationStatus> {
    store
        .fetch_application(key)
        .expect("store readable")
        .map(|record| record.status)
}

pub(super) fn stored_interview(store: &DocumentStore, key: &ApplicantKey) -> Option<InterviewRecord> {
    store.fetch_interview(key).expect("store readable")
}

/// Store that lets another writer reject the application right before each commit.
pub(super) struct RacingStore {
    pub(super) inner: DocumentStore,
}

impl ApplicantRepository for RacingStore {
    fn insert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert_application(record)
    }

    fn fetch_application(
        &self,
        key: &ApplicantKey,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch_application(key)
    }

    fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.applications_for_job(job_id)
    }

    fn applications_for_seeker(
        &self,
        email: &Email,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.applications_for_seeker(email)
    }

    fn fetch_interview(
        &self,
        key: &ApplicantKey,
    ) -> Result<Option<InterviewRecord>, RepositoryError> {
        self.inner.fetch_interview(key)
    }

    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<InterviewRecord>, RepositoryError> {
        self.inner.interviews_for_job(job_id)
    }

    fn commit(&self, unit: UnitOfWork) -> Result<(), RepositoryError> {
        if let Some(current) = self.inner.fetch_application(unit.key())? {
            let rejected = ApplicationRecord {
                status: ApplicationStatus::Rejected,
                ..current
            };
            self.inner
                .commit(UnitOfWork::new(unit.key().clone()).put_application(rejected))?;
        }
        self.inner.commit(unit)
    }
}

pub(super) struct UnavailableStore;

impl ApplicantRepository for UnavailableStore {
    fn insert_application(
        &self,
        _record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_application(
        &self,
        _key: &ApplicantKey,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn applications_for_job(
        &self,
        _job_id: &JobId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn applications_for_seeker(
        &self,
        _email: &Email,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_interview(
        &self,
        _key: &ApplicantKey,
    ) -> Result<Option<InterviewRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn interviews_for_job(
        &self,
        _job_id: &JobId,
    ) -> Result<Vec<InterviewRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn commit(&self, _unit: UnitOfWork) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("valid request")
}

pub(super) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
