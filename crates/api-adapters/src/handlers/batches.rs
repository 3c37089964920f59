//! Batch endpoints, addressed through their owning course.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use domains::DomainError;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::BatchView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/course/{courseId}", get(list_batches).post(add_batch))
        .route("/course/{courseId}/batch/{batchId}", get(get_batch))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBatchRequest {
    name: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

async fn add_batch(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(course_id): Path<Uuid>,
    ApiJson(body): ApiJson<AddBatchRequest>,
) -> ApiResult<Json<ApiResponse<BatchView>>> {
    let (Some(name), Some(start_date), Some(end_date)) =
        (body.name, body.start_date, body.end_date)
    else {
        return Err(
            DomainError::Validation("Name, start date, and end date are required".into()).into(),
        );
    };

    let batch = state
        .batches
        .add_batch(course_id, &name, start_date, end_date)
        .await?;

    Ok(Json(ApiResponse::ok(
        BatchView::from(&batch),
        "Batch added successfully",
    )))
}

async fn list_batches(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<BatchView>>>> {
    let batches = state.batches.list_batches(course_id).await?;
    let views = batches.iter().map(BatchView::from).collect();
    Ok(Json(ApiResponse::ok(views, "Batches fetched successfully")))
}

async fn get_batch(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((course_id, batch_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<BatchView>>> {
    let batch = state.batches.get_batch(course_id, batch_id).await?;
    Ok(Json(ApiResponse::ok(
        BatchView::from(&batch),
        "Batch fetched successfully",
    )))
}
