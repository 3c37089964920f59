//! # api-adapters
//!
//! The HTTP surface of Lectern: axum routers and handlers, the JSON
//! response envelope, error-to-status mapping, bearer-token extraction,
//! and request metrics. Everything mounts under `/api/v1`, mirroring
//! the route table the web client expects.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod state;
pub mod views;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Assembles the full application router.
///
/// `cors_origin` is the single origin allowed to make credentialed
/// cross-origin calls; `None` disables CORS relaxation entirely.
pub fn router(state: AppState, cors_origin: Option<&str>) -> Router {
    let api = Router::new()
        .route("/healthcheck", get(handlers::health::health_check))
        .nest("/auth", handlers::auth::routes())
        .nest("/courses", handlers::courses::routes())
        .nest("/batches", handlers::batches::routes())
        .nest("/lectures", handlers::lectures::routes());

    Router::new()
        .nest("/api/v1", api)
        .route("/metrics", get(metrics::serve_metrics))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_policy(cors_origin))
        .with_state(state)
}
