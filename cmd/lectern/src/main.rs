//! # Lectern Binary
//!
//! Assembles the application: configuration, logging, the SQLite store,
//! the service layer, and the axum router.

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use secrecy::ExposeSecret;

use api_adapters::AppState;
use auth_adapters::{Argon2Hasher, JwtAuthority};
use configs::AppConfig;
use domains::ports::{CourseRepo, LectureRepo, TokenAuthority, UserRepo};
use services::{AuthService, BatchService, CourseService, LectureService};
use storage_adapters::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(config.log.json);

    // Day buckets are computed in a fixed offset: configured, or the
    // host's offset captured once at startup.
    let offset = config
        .schedule
        .offset()?
        .unwrap_or_else(|| *Local::now().offset());
    tracing::info!(schedule_offset = %offset, "scheduling day boundary offset");

    // 1. Storage
    let store = SqliteStore::connect(&config.database.url)
        .await
        .context("failed to open database")?;
    let users: Arc<dyn UserRepo> = Arc::new(store.users());
    let courses: Arc<dyn CourseRepo> = Arc::new(store.courses());
    let lectures: Arc<dyn LectureRepo> = Arc::new(store.lectures());

    // 2. Auth
    let tokens: Arc<dyn TokenAuthority> = Arc::new(JwtAuthority::new(
        config.auth.jwt_secret.expose_secret().as_bytes(),
        config.auth.token_ttl_secs,
    ));
    let auth = Arc::new(AuthService::new(
        users.clone(),
        Arc::new(Argon2Hasher::new()),
        tokens.clone(),
    ));

    // 3. Services
    let course_svc = Arc::new(CourseService::new(courses.clone()));
    let batch_svc = Arc::new(BatchService::new(courses.clone()));
    let lecture_svc = Arc::new(LectureService::new(
        lectures,
        courses,
        users.clone(),
        offset,
    ));

    // 4. HTTP
    let state = AppState::new(auth, course_svc, batch_svc, lecture_svc, users, tokens);
    let app = api_adapters::router(state, config.server.cors_origin.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "lectern listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
