//! Liveness endpoint.

use axum::Json;
use serde_json::json;

use crate::response::ApiResponse;

pub async fn health_check() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok" }), "Health check passed"))
}
