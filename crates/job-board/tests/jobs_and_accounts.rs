//! Posting management and account flows exercised through their public routers.

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use job_board::board::accounts::{
    account_router, AccountService, AccountServiceError, LoginRequest, SeekerRegistration,
};
use job_board::board::jobs::{
    job_router, JobBoardService, JobCsvImporter, JobServiceError, JobType,
};
use job_board::board::{DocumentStore, Email};

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

fn jobs_app() -> Router {
    job_router(Arc::new(JobBoardService::new(Arc::new(
        DocumentStore::in_memory(),
    ))))
}

fn accounts_app() -> Router {
    account_router(Arc::new(AccountService::new(Arc::new(
        DocumentStore::in_memory(),
    ))))
}

#[tokio::test]
async fn job_crud_round_trip() {
    let app = jobs_app();

    let created = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/jobs",
            Some(json!({
                "title": "Platform Engineer",
                "company": "Acme",
                "location": "Berlin",
                "type": "part-time",
                "salary": "60k",
                "postedBy": "HR@acme.io",
            })),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let job = json_body(created).await;
    assert_eq!(job["type"], "Part Time");
    assert_eq!(job["postedBy"], "hr@acme.io");
    let uri = format!("/api/jobs/{}", job["id"].as_str().expect("id"));

    let updated = app
        .clone()
        .oneshot(request(
            Method::PUT,
            &uri,
            Some(json!({ "title": "Staff Platform Engineer", "company": "Acme" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = json_body(updated).await;
    assert_eq!(updated["title"], "Staff Platform Engineer");
    assert_eq!(updated["postedBy"], "hr@acme.io");

    let deleted = app
        .clone()
        .oneshot(request(Method::DELETE, &uri, None))
        .await
        .expect("route executes");
    assert_eq!(deleted.status(), StatusCode::OK);

    let missing = app
        .oneshot(request(Method::GET, &uri, None))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn job_without_title_is_bad_request() {
    let response = jobs_app()
        .oneshot(request(
            Method::POST,
            "/api/jobs",
            Some(json!({ "company": "Acme", "postedBy": "hr@acme.io" })),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("message")
        .contains("title is required"));
}

#[test]
fn csv_import_is_all_or_nothing() {
    let store = Arc::new(DocumentStore::in_memory());
    let service = JobBoardService::new(store);
    let poster = Email::parse("hr@acme.io").expect("email");

    let good = "Title,Company,Location,Type,Salary,Description\n\
                Backend,Acme,Remote,Remote,100k,APIs\n\
                Intern,Acme,Paris,Internship,,Learn\n";
    let drafts = JobCsvImporter::from_reader(Cursor::new(good), &poster).expect("parse csv");
    let imported = service.import(drafts).expect("import");
    assert_eq!(imported.len(), 2);
    assert!(imported
        .iter()
        .any(|job| job.job_type == JobType::Internship));

    let bad = "Title,Company,Location,Type,Salary,Description\n\
               Frontend,Acme,Remote,Remote,90k,UI\n\
               ,Acme,Remote,Remote,90k,No title\n";
    let drafts = JobCsvImporter::from_reader(Cursor::new(bad), &poster).expect("parse csv");
    match service.import(drafts) {
        Err(JobServiceError::InvalidInput(reason)) => assert!(reason.starts_with("row 2")),
        other => panic!("expected invalid row, got {other:?}"),
    }
    assert_eq!(service.list().expect("list").len(), 2);
}

#[tokio::test]
async fn seeker_register_login_and_profile() {
    let app = accounts_app();

    let registered = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/seeker/register",
            Some(json!({
                "name": "Ada",
                "email": "Ada@x.com",
                "password": "long-enough-secret",
                "age": 31,
            })),
        ))
        .await
        .expect("route executes");
    assert_eq!(registered.status(), StatusCode::CREATED);
    let profile = json_body(registered).await;
    assert_eq!(profile["email"], "ada@x.com");
    assert!(profile.get("password").is_none());

    let duplicate = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/seeker/register",
            Some(json!({ "name": "Ada", "email": "ada@x.com", "password": "another-secret" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let wrong = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/seeker/login",
            Some(json!({ "email": "ada@x.com", "password": "not-the-secret" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let updated = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/seeker/profile",
            Some(json!({ "email": "ada@x.com", "bio": "Rustacean" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(updated.status(), StatusCode::OK);

    let fetched = app
        .oneshot(request(Method::GET, "/api/seeker/profile?email=ada@x.com", None))
        .await
        .expect("route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    let profile = json_body(fetched).await;
    assert_eq!(profile["bio"], "Rustacean");
    assert_eq!(profile["name"], "Ada");
}

#[test]
fn employer_login_checks_hashed_password() {
    let service = AccountService::new(Arc::new(DocumentStore::in_memory()));
    service
        .register_employer(job_board::board::accounts::EmployerRegistration {
            email: Some("hr@acme.io".to_string()),
            password: Some("correct-horse".to_string()),
            company: Some("Acme".to_string()),
        })
        .expect("register");

    let profile = service
        .authenticate_employer(LoginRequest {
            email: Some("HR@acme.io".to_string()),
            password: Some("correct-horse".to_string()),
        })
        .expect("login");
    assert_eq!(profile.company, "Acme");

    assert!(matches!(
        service.authenticate_employer(LoginRequest {
            email: Some("hr@acme.io".to_string()),
            password: Some("battery-staple".to_string()),
        }),
        Err(AccountServiceError::InvalidCredentials)
    ));
}

#[test]
fn short_passwords_are_refused() {
    let service = AccountService::new(Arc::new(DocumentStore::in_memory()));
    let result = service.register_seeker(SeekerRegistration {
        name: Some("Bo".to_string()),
        email: Some("bo@x.com".to_string()),
        password: Some("short".to_string()),
        ..SeekerRegistration::default()
    });
    assert!(matches!(result, Err(AccountServiceError::InvalidInput(_))));
}
