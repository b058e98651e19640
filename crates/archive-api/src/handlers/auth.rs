//! Auth handlers: register, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use archive_entity::user::User;
use archive_service::auth::AuthResponse;

use crate::dto::request::{LoginBody, RegisterBody, validate_request};
use crate::error::ApiResult;
use crate::extractors::AccountUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterBody>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    validate_request(&req)?;
    let response = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginBody>,
) -> ApiResult<Json<AuthResponse>> {
    validate_request(&req)?;
    let response = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
///
/// Pending accounts may call this to check on their approval.
pub async fn me(AccountUser(user): AccountUser) -> Json<User> {
    Json(user)
}
