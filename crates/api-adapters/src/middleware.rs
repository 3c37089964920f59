//! Cross-cutting HTTP layers.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Configures CORS for the single browser origin the web client runs on.
///
/// With no origin configured (or an unparseable one) the default
/// restrictive layer applies and cross-origin requests stay blocked.
pub fn cors_policy(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };
    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(%origin, "ignoring unparseable CORS origin");
            CorsLayer::new()
        }
    }
}
