//! Lecture endpoints: scheduling (admin-only) and the filtered listings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use domains::DomainError;
use services::{CreateLecture, ListFilter};

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::LectureView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_lectures).post(create_lecture))
        .route("/my-lectures", get(get_my_lectures))
        .route("/instructor/{instructorId}", get(get_lectures_by_instructor))
        .route("/course/{courseId}", get(get_lectures_by_course))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLectureRequest {
    course_id: Option<Uuid>,
    instructor_id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    start_time: Option<DateTime<Utc>>,
}

async fn create_lecture(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiJson(body): ApiJson<CreateLectureRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<LectureView>>)> {
    // Required fields; description is the one optional input.
    let (Some(course_id), Some(instructor_id), Some(title), Some(start_time)) =
        (body.course_id, body.instructor_id, body.title, body.start_time)
    else {
        return Err(DomainError::Validation("Required fields missing".into()).into());
    };

    let details = state
        .lectures
        .create(
            admin.0.id,
            CreateLecture {
                course_id,
                instructor_id,
                title,
                description: body.description,
                start_time,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            LectureView::from(&details),
            "Lecture scheduled successfully",
        )),
    ))
}

async fn get_all_lectures(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<LectureView>>>> {
    let lectures = state.lectures.list(ListFilter::All).await?;
    let views = lectures.iter().map(LectureView::from).collect();
    Ok(Json(ApiResponse::ok(views, "Lectures fetched successfully")))
}

async fn get_my_lectures(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<LectureView>>>> {
    let lectures = state.lectures.list(ListFilter::Mine(user.id)).await?;
    let views = lectures.iter().map(LectureView::from).collect();
    Ok(Json(ApiResponse::ok(
        views,
        "Your lectures fetched successfully",
    )))
}

async fn get_lectures_by_instructor(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(instructor_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<LectureView>>>> {
    let lectures = state
        .lectures
        .list(ListFilter::ByInstructor(instructor_id))
        .await?;
    let views = lectures.iter().map(LectureView::from).collect();
    Ok(Json(ApiResponse::ok(
        views,
        "Instructor lectures fetched successfully",
    )))
}

/// Unlike the other listings, an empty by-course result is a 404.
async fn get_lectures_by_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<LectureView>>>> {
    let lectures = state.lectures.list(ListFilter::ByCourse(course_id)).await?;
    let views = lectures.iter().map(LectureView::from).collect();
    Ok(Json(ApiResponse::ok(
        views,
        "Course lectures fetched successfully",
    )))
}
