use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::board::http::error_response;
use crate::board::identity::JobId;

use super::domain::{ApplicantSelector, ApplyRequest, InterviewRequest, StatusUpdateRequest};
use super::repository::ApplicantRepository;
use super::service::{ApplicantLifecycleService, LifecycleError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobQuery {
    #[serde(default)]
    job_id: Option<String>,
}

/// Router builder exposing the applicant lifecycle: apply, review, schedule, reject, withdraw.
pub fn applicant_router<S>(service: Arc<ApplicantLifecycleService<S>>) -> Router
where
    S: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/apply", post(apply_handler::<S>))
        .route(
            "/api/applicant",
            get(list_handler::<S>).delete(remove_handler::<S>),
        )
        .route("/api/applicant/status", put(status_handler::<S>))
        .route("/api/interviews", post(schedule_handler::<S>))
        .route("/api/interviews/job/:job_id", get(interviews_handler::<S>))
        .route(
            "/api/withdraw-application",
            delete(withdraw_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn apply_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    match service.apply(request) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Query(query): Query<JobQuery>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    let Some(job_id) = query.job_id.as_deref().and_then(JobId::parse) else {
        return error_response(StatusCode::BAD_REQUEST, "jobId query parameter is required");
    };

    match service.list_applicants(&job_id) {
        Ok(applicants) => (StatusCode::OK, Json(applicants)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Json(request): Json<StatusUpdateRequest>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    match service.update_status(request) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn remove_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Query(selector): Query<ApplicantSelector>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    removal(&service, &selector, "applicant removed")
}

pub(crate) async fn schedule_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Json(request): Json<InterviewRequest>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    match service.schedule(request) {
        Ok(interview) => (StatusCode::CREATED, Json(interview)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn interviews_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    match service.interviews_for_job(&JobId(job_id)) {
        Ok(interviews) => (StatusCode::OK, Json(interviews)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn withdraw_handler<S>(
    State(service): State<Arc<ApplicantLifecycleService<S>>>,
    Json(selector): Json<ApplicantSelector>,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    removal(&service, &selector, "application withdrawn")
}

fn removal<S>(
    service: &ApplicantLifecycleService<S>,
    selector: &ApplicantSelector,
    message: &str,
) -> Response
where
    S: ApplicantRepository + 'static,
{
    let key = match selector.key() {
        Ok(key) => key,
        Err(reason) => return error_response(StatusCode::BAD_REQUEST, reason),
    };

    match service.withdraw(key) {
        Ok(removed) => {
            let payload = json!({ "message": message, "removed": removed });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => failure(err),
    }
}

fn failure(err: LifecycleError) -> Response {
    error_response(err.status_code(), err.to_string())
}
