//! User entity model.

use archive_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::access::AccessLevel;
use super::role::UserRole;
use super::status::UserStatus;

/// A registered archive user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier; `None` until first save.
    pub id: Option<UserId>,
    /// Display name.
    pub name: String,
    /// Unique, lower-cased email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role chosen at registration.
    pub role: UserRole,
    /// Approval state; only approved users may log in.
    pub status: UserStatus,
    /// Highest document access level this user may read.
    pub access_level: AccessLevel,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
        status: UserStatus,
        access_level: AccessLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            status,
            access_level,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Check whether this user may read material at `required`.
    pub fn can_read(&self, required: AccessLevel) -> bool {
        self.status != UserStatus::Suspended && self.access_level.permits(required)
    }

    /// Short public projection of this user.
    pub fn summary(&self) -> Option<UserSummary> {
        self.id.map(|id| UserSummary {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        })
    }
}

/// Public projection of a user, resolved on demand for cross-references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}
