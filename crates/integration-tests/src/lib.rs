//! # integration-tests
//!
//! Shared fixtures for the cross-crate suite: a router backed by the
//! in-memory store for HTTP-level tests, and a service stack backed by
//! a fresh in-memory SQLite database for scheduling scenarios.

pub mod fixtures {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use chrono::{FixedOffset, Utc};
    use serde_json::Value;
    use uuid::Uuid;

    use api_adapters::{router, AppState};
    use auth_adapters::{Argon2Hasher, JwtAuthority};
    use domains::models::{Course, CourseLevel, Role, User};
    use domains::ports::{CourseRepo, LectureRepo, TokenAuthority, UserRepo};
    use services::{AuthService, BatchService, CourseService, LectureService};
    use storage_adapters::{MemoryStore, SqliteStore};

    pub const TEST_PASSWORD: &str = "hunter2hunter2";

    /// Full application router on the in-memory store, with UTC day
    /// buckets and a fixed signing secret.
    pub fn memory_app() -> Router {
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

    /// Service stack over a fresh in-memory SQLite database.
    pub struct SqliteStack {
        pub users: Arc<dyn UserRepo>,
        pub courses: Arc<dyn CourseRepo>,
        pub lectures: Arc<dyn LectureRepo>,
        pub lecture_svc: LectureService,
    }

    pub async fn sqlite_stack() -> SqliteStack {
        let store = SqliteStore::connect_memory().await.unwrap();
        let users: Arc<dyn UserRepo> = Arc::new(store.users());
        let courses: Arc<dyn CourseRepo> = Arc::new(store.courses());
        let lectures: Arc<dyn LectureRepo> = Arc::new(store.lectures());
        let lecture_svc = LectureService::new(
            lectures.clone(),
            courses.clone(),
            users.clone(),
            FixedOffset::east_opt(0).unwrap(),
        );
        SqliteStack {
            users,
            courses,
            lectures,
            lecture_svc,
        }
    }

    pub async fn seed_user(users: &Arc<dyn UserRepo>, email: &str, role: Role) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: "Seeded".into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            role,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.clone()).await.unwrap();
        user
    }

    pub async fn seed_course(courses: &Arc<dyn CourseRepo>, code: &str) -> Course {
        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            name: "Seeded Course".into(),
            code: code.into(),
            description: "Fixture course".into(),
            level: CourseLevel::Easy,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        courses.insert(course.clone()).await.unwrap();
        course
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        use tower::ServiceExt;

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

    pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Registers an account through the API and returns its access token
    /// and id.
    pub async fn register_and_login(
        app: &Router,
        name: &str,
        email: &str,
        role: &str,
    ) -> (String, Uuid) {
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/auth/register",
                None,
                serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": TEST_PASSWORD,
                    "role": role,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let id: Uuid = body["data"]["id"].as_str().unwrap().parse().unwrap();

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/auth/login",
                None,
                serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let token = body["data"]["accessToken"].as_str().unwrap().to_string();
        (token, id)
    }
}
