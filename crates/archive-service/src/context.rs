//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use archive_core::error::AppError;
use archive_core::types::UserId;
use archive_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's stored role, reloaded for this request.
    pub role: UserRole,
    /// The user's stored email.
    pub email: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        role: UserRole,
        email: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            role,
            email,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is an archivist or admin.
    pub fn is_curator(&self) -> bool {
        self.role.is_curator()
    }

    /// Whether the current user is `user_id` or a curator.
    pub fn is_self_or_curator(&self, user_id: UserId) -> bool {
        self.user_id == user_id || self.is_curator()
    }

    /// Fail unless the current user is an archivist or admin.
    pub fn require_curator(&self) -> Result<(), AppError> {
        if self.is_curator() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only archivists and administrators may perform this action",
            ))
        }
    }

    /// Fail unless the current user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only administrators may perform this action",
            ))
        }
    }
}
