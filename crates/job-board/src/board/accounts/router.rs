use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::board::http::{error_response, EmailQuery};

use super::domain::{EmployerRegistration, LoginRequest, SeekerProfileUpdate, SeekerRegistration};
use super::repository::AccountRepository;
use super::service::{AccountService, AccountServiceError};

/// Router builder exposing registration, login checks, and seeker profiles.
pub fn account_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: AccountRepository + 'static,
{
    Router::new()
        .route("/api/seeker/register", post(register_seeker_handler::<R>))
        .route("/api/seeker/login", post(seeker_login_handler::<R>))
        .route(
            "/api/seeker/profile",
            get(seeker_profile_handler::<R>).put(update_profile_handler::<R>),
        )
        .route("/api/employer/register", post(register_employer_handler::<R>))
        .route("/api/employer/login", post(employer_login_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_seeker_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(registration): Json<SeekerRegistration>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.register_seeker(registration) {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn seeker_login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(login): Json<LoginRequest>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.authenticate_seeker(login) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn seeker_profile_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    R: AccountRepository + 'static,
{
    let email = match query.parse() {
        Ok(email) => email,
        Err(response) => return response,
    };

    match service.seeker_profile(&email) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn update_profile_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(update): Json<SeekerProfileUpdate>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.update_seeker_profile(update) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn register_employer_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(registration): Json<EmployerRegistration>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.register_employer(registration) {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn employer_login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(login): Json<LoginRequest>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.authenticate_employer(login) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => failure(err),
    }
}

fn failure(err: AccountServiceError) -> Response {
    error_response(err.status_code(), err.to_string())
}
