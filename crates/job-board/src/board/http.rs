use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::identity::Email;

/// `?email=` query shared by the per-account read endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct EmailQuery {
    #[serde(default)]
    pub(crate) email: Option<String>,
}

impl EmailQuery {
    pub(crate) fn parse(&self) -> Result<Email, Response> {
        self.email
            .as_deref()
            .and_then(Email::parse)
            .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "email query parameter is required"))
    }
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}
