use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::board::http::error_response;
use crate::board::identity::JobId;

use super::domain::JobDraft;
use super::repository::JobRepository;
use super::service::{JobBoardService, JobServiceError};

/// Router builder exposing posting CRUD.
pub fn job_router<J>(service: Arc<JobBoardService<J>>) -> Router
where
    J: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/jobs",
            get(list_handler::<J>).post(create_handler::<J>),
        )
        .route(
            "/api/jobs/:job_id",
            get(fetch_handler::<J>)
                .put(update_handler::<J>)
                .delete(delete_handler::<J>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<J>(
    State(service): State<Arc<JobBoardService<J>>>,
    Json(draft): Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
{
    match service.create(draft) {
        Ok(posting) => (StatusCode::CREATED, Json(posting)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn list_handler<J>(State(service): State<Arc<JobBoardService<J>>>) -> Response
where
    J: JobRepository + 'static,
{
    match service.list() {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn fetch_handler<J>(
    State(service): State<Arc<JobBoardService<J>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
{
    match service.get(&JobId(job_id)) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn update_handler<J>(
    State(service): State<Arc<JobBoardService<J>>>,
    Path(job_id): Path<String>,
    Json(draft): Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
{
    match service.update(&JobId(job_id), draft) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn delete_handler<J>(
    State(service): State<Arc<JobBoardService<J>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
{
    match service.delete(&JobId(job_id)) {
        Ok(removed) => {
            let payload = json!({ "message": "job deleted", "id": removed.id });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => failure(err),
    }
}

fn failure(err: JobServiceError) -> Response {
    error_response(err.status_code(), err.to_string())
}
