//! Course endpoints. Reads are open to any authenticated account;
//! writes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use domains::models::CourseLevel;
use domains::DomainError;
use services::CreateCourse;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::CourseView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/{courseId}", get(get_course).delete(delete_course))
}

#[derive(Debug, Deserialize)]
struct CreateCourseRequest {
    name: Option<String>,
    code: Option<String>,
    description: Option<String>,
    level: Option<CourseLevel>,
}

async fn create_course(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiJson(body): ApiJson<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CourseView>>)> {
    let (Some(name), Some(code), Some(description), Some(level)) =
        (body.name, body.code, body.description, body.level)
    else {
        return Err(DomainError::Validation("All fields are required".into()).into());
    };

    let course = state
        .courses
        .create(
            admin.0.id,
            CreateCourse {
                name,
                code,
                description,
                level,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            CourseView::from(&course),
            "Course created successfully",
        )),
    ))
}

async fn list_courses(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<CourseView>>>> {
    let courses = state.courses.list().await?;
    let views = courses.iter().map(CourseView::from).collect();
    Ok(Json(ApiResponse::ok(views, "Courses fetched successfully")))
}

async fn get_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CourseView>>> {
    let course = state.courses.get(course_id).await?;
    Ok(Json(ApiResponse::ok(
        CourseView::from(&course),
        "Course fetched successfully",
    )))
}

async fn delete_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    state.courses.delete(course_id).await?;
    Ok(Json(ApiResponse::ok(
        json!({}),
        "Course deleted successfully",
    )))
}
