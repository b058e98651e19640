//! User administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use archive_core::types::UserId;
use archive_entity::user::User;
use archive_service::user::{AccessUpdate, ProfileUpdate, RoleUpdate, UserStats};

use crate::dto::request::UserListQuery;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .user_service
        .list_users(&auth, query.role, query.status)
        .await?;
    Ok(Json(users))
}

/// GET /api/users/stats/overview
pub async fn user_stats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserStats>> {
    Ok(Json(state.user_service.stats(&auth).await?))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.get_user(&auth, id).await?))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.update_profile(&auth, id, update).await?))
}

/// PUT /api/users/{id}/access
pub async fn update_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(update): Json<AccessUpdate>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.update_access(&auth, id, update).await?))
}

/// PUT /api/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(update): Json<RoleUpdate>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.change_role(&auth, id, update).await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
