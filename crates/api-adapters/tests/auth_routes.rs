//! Router-level tests for the auth endpoints: registration, login,
//! bearer extraction, and the admin gate. Runs against the in-memory
//! store with real argon2 hashing and real JWTs.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::FixedOffset;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_adapters::{router, AppState};
use auth_adapters::{Argon2Hasher, JwtAuthority};
use domains::ports::{CourseRepo, LectureRepo, TokenAuthority, UserRepo};
use services::{AuthService, BatchService, CourseService, LectureService};
use storage_adapters::MemoryStore;

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserRepo> = store.clone();
    let courses: Arc<dyn CourseRepo> = store.clone();
    let lectures: Arc<dyn LectureRepo> = store.clone();

    let tokens: Arc<dyn TokenAuthority> = Arc::new(JwtAuthority::new(b"test-secret", 3600));
    let auth = Arc::new(AuthService::new(
        users.clone(),
        Arc::new(Argon2Hasher::new()),
        tokens.clone(),
    ));
    let course_svc = Arc::new(CourseService::new(courses.clone()));
    let batch_svc = Arc::new(BatchService::new(courses.clone()));
    let lecture_svc = Arc::new(LectureService::new(
        lectures,
        courses,
        users.clone(),
        FixedOffset::east_opt(0).unwrap(),
    ));

    let state = AppState::new(auth, course_svc, batch_svc, lecture_svc, users, tokens);
    router(state, None)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn register_and_login(app: &Router, name: &str, email: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        post_json(
            "/api/v1/auth/register",
            json!({ "name": name, "email": email, "password": "hunter2hunter2", "role": role }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/auth/login",
            json!({ "email": email, "password": "hunter2hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_is_open() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/v1/healthcheck")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn register_login_me_round_trip() {
    let app = test_app();
    let token = register_and_login(&app, "Grace", "grace@example.com", "instructor").await;

    let (status, body) = send(&app, get_with_token("/api/v1/auth/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "grace@example.com");
    assert_eq!(body["data"]["role"], "instructor");
    // The hash never leaks onto the wire.
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized request");
}

#[tokio::test]
async fn garbage_tokens_are_unauthorized() {
    let app = test_app();
    let (status, body) =
        send(&app, get_with_token("/api/v1/auth/me", "not.a.token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid access token");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();
    let payload = json!({
        "name": "Grace",
        "email": "grace@example.com",
        "password": "hunter2hunter2",
    });

    let (status, _) = send(&app, post_json("/api/v1/auth/register", payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/api/v1/auth/register", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
async fn missing_login_fields_are_bad_requests() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/auth/login", json!({ "email": "x@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and password are required");
}

#[tokio::test]
async fn instructor_listing_is_admin_only() {
    let app = test_app();
    let instructor_token =
        register_and_login(&app, "Ada", "ada@example.com", "instructor").await;
    let admin_token = register_and_login(&app, "Root", "root@example.com", "admin").await;

    let (status, _) = send(
        &app,
        get_with_token("/api/v1/auth/instructors", &instructor_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        get_with_token("/api/v1/auth/instructors", &admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let instructors = body["data"].as_array().unwrap();
    assert_eq!(instructors.len(), 1);
    assert_eq!(instructors[0]["email"], "ada@example.com");
}
