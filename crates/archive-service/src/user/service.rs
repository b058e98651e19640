//! User listing, profile and access management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::ValidateEmail;

use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::UserId;
use archive_database::repositories::UserRepository;
use archive_entity::user::{AccessLevel, User, UserRole, UserStatus};

use crate::auth::{AuthService, registration_profile};
use crate::context::RequestContext;

/// Fields a user (or an admin) may change on a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name (optional).
    pub name: Option<String>,
    /// New email (optional).
    pub email: Option<String>,
}

/// Curator-only account changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessUpdate {
    pub status: Option<UserStatus>,
    pub access_level: Option<AccessLevel>,
}

/// Admin-only role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: UserRole,
}

/// Account counts by approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    pub pending: u64,
    pub approved: u64,
    pub suspended: u64,
}

/// Handles user administration.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Lists users, optionally filtered by role or status (curators only).
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        role: Option<UserRole>,
        status: Option<UserStatus>,
    ) -> Result<Vec<User>, AppError> {
        ctx.require_curator()?;
        match (role, status) {
            (Some(role), None) => self.user_repo.find_by_role(role).await,
            (None, Some(status)) => self.user_repo.find_by_status(status).await,
            (Some(role), Some(status)) => Ok(self
                .user_repo
                .find_by_role(role)
                .await?
                .into_iter()
                .filter(|u| u.status == status)
                .collect()),
            (None, None) => self.user_repo.find_all().await,
        }
    }

    /// Gets a user (self or curator).
    pub async fn get_user(&self, ctx: &RequestContext, id: UserId) -> Result<User, AppError> {
        if !ctx.is_self_or_curator(id) {
            return Err(AppError::authorization("You may only view your own profile"));
        }
        self.load(id).await
    }

    /// Updates name and/or email (self or admin).
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        if ctx.user_id != id && !ctx.is_admin() {
            return Err(AppError::authorization("You may only edit your own profile"));
        }
        let mut user = self.load(id).await?;

        if let Some(name) = update.name {
            let len = name.trim().chars().count();
            if !(2..=100).contains(&len) {
                return Err(AppError::validation(
                    "Name must be between 2 and 100 characters",
                ));
            }
            user.name = name.trim().to_string();
        }

        if let Some(email) = update.email {
            let email = AuthService::normalize_email(&email);
            if !email.validate_email() {
                return Err(AppError::validation("Invalid email format"));
            }
            if let Some(existing) = self.user_repo.find_by_email(&email).await? {
                if existing.id != Some(id) {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
            user.email = email;
        }

        let saved = self.user_repo.save(&user).await?;
        info!(user_id = %id, actor = %ctx.user_id, "Profile updated");
        Ok(saved)
    }

    /// Changes approval status and/or access level (curators only).
    pub async fn update_access(
        &self,
        ctx: &RequestContext,
        id: UserId,
        update: AccessUpdate,
    ) -> Result<User, AppError> {
        ctx.require_curator()?;
        if update.status.is_none() && update.access_level.is_none() {
            return Err(AppError::validation(
                "Provide a status and/or an access level",
            ));
        }

        let current = self.load(id).await?;
        let status = update.status.unwrap_or(current.status);
        let access_level = update.access_level.unwrap_or(current.access_level);

        if !self.user_repo.update_access(id, status, access_level).await? {
            return Err(AppError::not_found(format!("User not found with ID: {id}")));
        }
        info!(
            user_id = %id,
            actor = %ctx.user_id,
            status = %status,
            access_level = %access_level,
            "User access updated"
        );
        self.load(id).await
    }

    /// Changes a user's role (admins only, never their own).
    ///
    /// The access level follows the new role: full for archivists and
    /// admins, the registration level otherwise. Status is untouched.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        id: UserId,
        update: RoleUpdate,
    ) -> Result<User, AppError> {
        ctx.require_admin()?;
        if ctx.user_id == id {
            return Err(AppError::validation("You cannot change your own role"));
        }

        let current = self.load(id).await?;
        let role = update.role;
        let access_level = if role.is_curator() {
            AccessLevel::Full
        } else {
            registration_profile(role).0
        };

        if !self.user_repo.update_role(id, role, access_level).await? {
            return Err(AppError::not_found(format!("User not found with ID: {id}")));
        }
        info!(
            user_id = %id,
            actor = %ctx.user_id,
            old_role = %current.role,
            new_role = %role,
            "User role changed"
        );
        self.load(id).await
    }

    /// Deletes a user (admins only).
    pub async fn delete_user(&self, ctx: &RequestContext, id: UserId) -> Result<(), AppError> {
        ctx.require_admin()?;
        if ctx.user_id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        if !self.user_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!("User not found with ID: {id}")));
        }
        info!(user_id = %id, actor = %ctx.user_id, "User deleted");
        Ok(())
    }

    /// Account counts (curators only).
    pub async fn stats(&self, ctx: &RequestContext) -> Result<UserStats, AppError> {
        ctx.require_curator()?;
        Ok(UserStats {
            total_users: self.user_repo.count().await?,
            pending: self.user_repo.count_by_status(UserStatus::Pending).await?,
            approved: self.user_repo.count_by_status(UserStatus::Approved).await?,
            suspended: self.user_repo.count_by_status(UserStatus::Suspended).await?,
        })
    }

    async fn load(&self, id: UserId) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User not found with ID: {id}")))
    }
}
