//! Request extractors: lenient JSON (400 on malformed bodies, matching
//! the validation taxonomy) and the bearer-token auth context.
//!
//! Auth is an explicit per-request value, never ambient state: handlers
//! receive `CurrentUser`/`AdminUser` as arguments.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use domains::models::Role;
use domains::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// `Json` with the rejection folded into the validation error shape.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError(DomainError::Validation(rejection.body_text()))),
        }
    }
}

/// The authenticated account behind the request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| DomainError::Unauthorized("Unauthorized request".to_string()))?;

        let claims = state.tokens.verify(token)?;

        // The token may outlive the account; re-resolve before trusting it.
        let user = state
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid access token".to_string()))?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        })
    }
}

/// `CurrentUser` narrowed to the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(ApiError(DomainError::Forbidden(
                "Access denied: insufficient permissions".to_string(),
            )));
        }
        Ok(AdminUser(user))
    }
}
