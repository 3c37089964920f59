//! Authentication and instructor-management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use domains::models::Role;
use domains::DomainError;
use services::RegisterUser;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::UserView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/instructors", get(list_instructors).post(create_instructor))
        .route("/instructors/{instructorId}", put(update_instructor))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<Role>,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserView>>)> {
    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(DomainError::Validation("All fields are required".into()).into());
    };

    let user = state
        .auth
        .register(RegisterUser {
            name,
            email,
            password,
            role: body.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            UserView::from(&user),
            "User registered successfully",
        )),
    ))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginView {
    user: UserView,
    access_token: String,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginView>>> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(DomainError::Validation("Email and password are required".into()).into());
    };

    let (user, access_token) = state.auth.login(&email, &password).await?;

    Ok(Json(ApiResponse::ok(
        LoginView {
            user: UserView::from(&user),
            access_token,
        },
        "User logged in successfully",
    )))
}

/// Tokens are stateless, so logout is a client-side discard; the
/// endpoint exists so the client has a uniform call to make.
async fn logout(_user: CurrentUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({}), "User logged out"))
}

async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.auth.current_user(user.id).await?;
    Ok(Json(ApiResponse::ok(
        UserView::from(&user),
        "User details fetched successfully",
    )))
}

async fn list_instructors(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<UserView>>>> {
    let instructors = state.auth.list_instructors().await?;
    let views = instructors.iter().map(UserView::from).collect();
    Ok(Json(ApiResponse::ok(
        views,
        "All instructors fetched successfully",
    )))
}

#[derive(Debug, Deserialize)]
struct CreateInstructorRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

async fn create_instructor(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(body): ApiJson<CreateInstructorRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserView>>)> {
    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(DomainError::Validation("All fields are required".into()).into());
    };

    let instructor = state.auth.create_instructor(&name, &email, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            UserView::from(&instructor),
            "Instructor created successfully",
        )),
    ))
}

#[derive(Debug, Deserialize)]
struct UpdateInstructorRequest {
    name: Option<String>,
    email: Option<String>,
}

async fn update_instructor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(instructor_id): Path<Uuid>,
    ApiJson(body): ApiJson<UpdateInstructorRequest>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let updated = state
        .auth
        .update_instructor(instructor_id, body.name, body.email)
        .await?;

    Ok(Json(ApiResponse::ok(
        UserView::from(&updated),
        "Instructor updated successfully",
    )))
}
