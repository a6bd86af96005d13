//! Read-only summaries shown on the seeker and employer dashboards.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::board::applicants::{ApplicantRepository, ApplicationStatus};
use crate::board::http::{error_response, EmailQuery};
use crate::board::identity::Email;
use crate::board::jobs::{JobPosting, JobRepository};
use crate::board::repository::RepositoryError;

/// A posting with the number of applications it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerJobSummary {
    #[serde(flatten)]
    pub job: JobPosting,
    pub applications_count: usize,
}

/// A posting a seeker applied to, with where that application stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

pub struct DashboardService<J, A> {
    jobs: Arc<J>,
    applicants: Arc<A>,
}

impl<J, A> DashboardService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applicants: Arc<A>) -> Self {
        Self { jobs, applicants }
    }

    /// The employer's postings, newest first.
    pub fn employer_jobs(
        &self,
        employer: &Email,
    ) -> Result<Vec<EmployerJobSummary>, DashboardError> {
        let mut jobs = self.jobs.posted_by(employer).map_err(store_failure)?;
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then_with(|| a.id.cmp(&b.id)));

        jobs.into_iter()
            .map(|job| -> Result<EmployerJobSummary, DashboardError> {
                let applications_count = self
                    .applicants
                    .applications_for_job(&job.id)
                    .map_err(store_failure)?
                    .len();
                Ok(EmployerJobSummary {
                    job,
                    applications_count,
                })
            })
            .collect()
    }

    /// Postings the seeker applied to, most recent application first. Applications
    /// whose posting has since been deleted are skipped.
    pub fn applied_jobs(&self, seeker: &Email) -> Result<Vec<AppliedJob>, DashboardError> {
        let mut applications = self
            .applicants
            .applications_for_seeker(seeker)
            .map_err(store_failure)?;
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

        let mut applied = Vec::with_capacity(applications.len());
        for application in applications {
            if let Some(job) = self.jobs.fetch(&application.job_id).map_err(store_failure)? {
                applied.push(AppliedJob {
                    job,
                    status: application.status,
                    applied_at: application.applied_at,
                });
            }
        }
        Ok(applied)
    }

    /// Interviews scheduled across every posting owned by the employer.
    pub fn interview_count(&self, employer: &Email) -> Result<usize, DashboardError> {
        let jobs = self.jobs.posted_by(employer).map_err(store_failure)?;
        let mut count = 0;
        for job in &jobs {
            count += self
                .applicants
                .interviews_for_job(&job.id)
                .map_err(store_failure)?
                .len();
        }
        Ok(count)
    }
}

fn store_failure(err: RepositoryError) -> DashboardError {
    error!(error = %err, "dashboard store failure");
    DashboardError::Repository(err)
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn dashboard_router<J, A>(service: Arc<DashboardService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/jobs/employer-jobs", get(employer_jobs_handler::<J, A>))
        .route("/api/applied-jobs", get(applied_jobs_handler::<J, A>))
        .route(
            "/api/stats/interview-count",
            get(interview_count_handler::<J, A>),
        )
        .with_state(service)
}

pub(crate) async fn employer_jobs_handler<J, A>(
    State(service): State<Arc<DashboardService<J, A>>>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let email = match query.parse() {
        Ok(email) => email,
        Err(response) => return response,
    };

    match service.employer_jobs(&email) {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub(crate) async fn applied_jobs_handler<J, A>(
    State(service): State<Arc<DashboardService<J, A>>>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let email = match query.parse() {
        Ok(email) => email,
        Err(response) => return response,
    };

    match service.applied_jobs(&email) {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub(crate) async fn interview_count_handler<J, A>(
    State(service): State<Arc<DashboardService<J, A>>>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let email = match query.parse() {
        Ok(email) => email,
        Err(response) => return response,
    };

    match service.interview_count(&email) {
        Ok(count) => (StatusCode::OK, Json(json!({ "count": count }))).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
