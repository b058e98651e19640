//! Token extractors: pull the JWT from the Authorization header, validate
//! it, and reload the account it names so status and role are current.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;

use archive_core::error::AppError;
use archive_entity::user::User;
use archive_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Only approved accounts get through; role and email come from the
/// stored row, not from the token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The account behind a valid token, pending or approved.
///
/// Used where a freshly registered user may look at their own account
/// before approval.
#[derive(Debug, Clone)]
pub struct AccountUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

async fn token_account(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let claims = state.jwt_decoder.decode_access_token(bearer_token(parts)?)?;
    state.auth_service.token_user(claims.user_id()).await
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = token_account(parts, state).await?;
        if !user.can_login() {
            return Err(AppError::authentication("Account pending approval").into());
        }
        let user_id = user
            .id
            .ok_or_else(|| AppError::internal("Stored user has no ID"))?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ctx = RequestContext::new(user_id, user.role, user.email, ip_address, user_agent);

        Ok(AuthUser(ctx))
    }
}

impl FromRequestParts<AppState> for AccountUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AccountUser(token_account(parts, state).await?))
    }
}
