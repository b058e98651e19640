//! Account registration and credential login.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::ValidateEmail;

use archive_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use archive_core::config::InitialAdminConfig;
use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::UserId;
use archive_database::repositories::UserRepository;
use archive_entity::user::{AccessLevel, User, UserRole, UserStatus};

use super::profile::registration_profile;

/// Registration input, already decoded from JSON or a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name (2 to 100 characters).
    pub name: String,
    /// Email address; trimmed and lower-cased before use.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role; unknown or missing means `public`.
    pub role: Option<String>,
}

/// Token plus the account fields a client needs after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub access_level: AccessLevel,
}

/// Handles registration and login.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
        }
    }

    /// Normalize an email address for storage and lookup.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Validate registration fields without touching the database.
    pub fn validate_registration(&self, req: &RegisterRequest) -> Result<(), AppError> {
        let name_len = req.name.trim().chars().count();
        if !(2..=100).contains(&name_len) {
            return Err(AppError::validation(
                "Name must be between 2 and 100 characters",
            ));
        }
        if !Self::normalize_email(&req.email).validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }
        self.validator.validate(&req.password)
    }

    /// Create an account without issuing a token.
    pub async fn create_account(&self, req: RegisterRequest) -> Result<User, AppError> {
        self.validate_registration(&req)?;
        let email = Self::normalize_email(&req.email);

        info!(email = %email, "Attempting to register user");

        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Registration failed: email already exists");
            return Err(AppError::conflict("Email already exists"));
        }

        let role = UserRole::from_registration(req.role.as_deref());
        let (access_level, status) = registration_profile(role);
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .save(&User::new(
                req.name.trim(),
                email,
                password_hash,
                role,
                status,
                access_level,
            ))
            .await?;

        info!(
            user_id = ?user.id,
            role = %user.role,
            status = %user.status,
            "User registered"
        );
        Ok(user)
    }

    /// Register a new account and issue a token for it.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let user = self.create_account(req).await?;
        self.issue(&user)
    }

    /// Create the bootstrap administrator unless its email is taken.
    ///
    /// Returns the new account, or `None` when nothing was created.
    pub async fn ensure_initial_admin(
        &self,
        admin: &InitialAdminConfig,
    ) -> Result<Option<User>, AppError> {
        let email = Self::normalize_email(&admin.email);
        if !email.validate_email() {
            return Err(AppError::configuration("Initial admin email is invalid"));
        }

        if let Some(existing) = self.user_repo.find_by_email(&email).await? {
            if existing.role != UserRole::Admin {
                warn!(
                    email = %email,
                    role = %existing.role,
                    "Initial admin email belongs to a non-admin account"
                );
            }
            return Ok(None);
        }

        self.validator.validate(&admin.password)?;
        let password_hash = self.hasher.hash_password(&admin.password)?;
        let user = self
            .user_repo
            .save(&User::new(
                admin.name.trim(),
                email,
                password_hash,
                UserRole::Admin,
                UserStatus::Approved,
                AccessLevel::Full,
            ))
            .await?;

        info!(user_id = ?user.id, email = %user.email, "Initial administrator created");
        Ok(Some(user))
    }

    /// Check credentials and approval state.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = Self::normalize_email(email);
        let invalid = || AppError::authentication("Invalid email or password");

        let user = self.user_repo.find_by_email(&email).await?.ok_or_else(|| {
            warn!(email = %email, "Login failed: unknown email");
            invalid()
        })?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(email = %email, "Login failed: bad password");
            return Err(invalid());
        }

        match user.status {
            UserStatus::Approved => Ok(user),
            UserStatus::Pending => {
                warn!(email = %email, "Login failed: account pending approval");
                Err(AppError::authentication("Account pending approval"))
            }
            UserStatus::Suspended => {
                warn!(email = %email, "Login failed: account suspended");
                Err(AppError::authentication("Account suspended"))
            }
        }
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.authenticate(email, password).await?;
        info!(user_id = ?user.id, "User logged in");
        self.issue(&user)
    }

    /// Load the account a token names, refusing deleted and suspended
    /// accounts.
    pub async fn token_user(&self, user_id: UserId) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        if user.status == UserStatus::Suspended {
            warn!(user_id = %user_id, "Token rejected: account suspended");
            return Err(AppError::user_suspended(user_id));
        }
        Ok(user)
    }

    fn issue(&self, user: &User) -> Result<AuthResponse, AppError> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::internal("Cannot issue a token for an unsaved user"))?;
        let (token, _) = self
            .encoder
            .generate_access_token(user_id, user.role, &user.email)?;

        Ok(AuthResponse {
            token,
            user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            access_level: user.access_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use archive_core::error::ErrorKind;

    fn request(email: &str, role: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: "Grace".into(),
            email: email.into(),
            password: "secret1".into(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_archivist_registration_is_full_and_approved() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);

        let resp = auth.register(request("arch@example.com", Some("archivist"))).await.unwrap();
        assert_eq!(resp.access_level, AccessLevel::Full);
        assert_eq!(resp.status, UserStatus::Approved);
        assert!(!resp.token.is_empty());
    }

    #[tokio::test]
    async fn test_researcher_is_pending_and_cannot_login() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);

        let resp = auth.register(request("res@example.com", Some("researcher"))).await.unwrap();
        assert_eq!(resp.access_level, AccessLevel::Restricted);
        assert_eq!(resp.status, UserStatus::Pending);

        let err = auth.login("res@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Account pending approval");
    }

    #[tokio::test]
    async fn test_unknown_role_defaults_to_public() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);

        let resp = auth.register(request("pub@example.com", Some("wizard"))).await.unwrap();
        assert_eq!(resp.role, UserRole::Public);
        assert_eq!(resp.access_level, AccessLevel::Public);
        assert_eq!(resp.status, UserStatus::Approved);

        let resp = auth.register(request("none@example.com", None)).await.unwrap();
        assert_eq!(resp.access_level, AccessLevel::Public);
    }

    #[tokio::test]
    async fn test_email_is_normalized_and_unique() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);

        let resp = auth.register(request("  Mixed@Example.COM ", None)).await.unwrap();
        assert_eq!(resp.email, "mixed@example.com");

        let err = auth.register(request("mixed@example.com", None)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Email already exists");
    }

    #[tokio::test]
    async fn test_validation_runs_before_persistence() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);

        let mut short = request("v@example.com", None);
        short.password = "123".into();
        assert_eq!(auth.register(short).await.unwrap_err().kind, ErrorKind::Validation);

        let mut bad_email = request("not-an-email", None);
        bad_email.name = "Valid Name".into();
        assert_eq!(auth.register(bad_email).await.unwrap_err().kind, ErrorKind::Validation);

        let mut bad_name = request("n@example.com", None);
        bad_name.name = "X".into();
        assert_eq!(auth.register(bad_name).await.unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_initial_admin_is_created_once() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);
        let admin = InitialAdminConfig {
            name: "Root".into(),
            email: " Root@Example.com".into(),
            password: "changeme".into(),
        };

        let created = auth.ensure_initial_admin(&admin).await.unwrap().unwrap();
        assert_eq!(created.role, UserRole::Admin);
        assert_eq!(created.email, "root@example.com");
        assert_eq!(created.access_level, AccessLevel::Full);
        assert!(auth.ensure_initial_admin(&admin).await.unwrap().is_none());

        let resp = auth.login("root@example.com", "changeme").await.unwrap();
        assert_eq!(resp.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_initial_admin_password_follows_policy() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);
        let admin = InitialAdminConfig {
            name: "Root".into(),
            email: "root@example.com".into(),
            password: "123".into(),
        };
        let err = auth.ensure_initial_admin(&admin).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_token_user_reflects_current_status() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);
        let repo = UserRepository::new(db.pool().clone());

        let resp = auth.register(request("tok@example.com", Some("archivist"))).await.unwrap();
        let user = auth.token_user(resp.user_id).await.unwrap();
        assert_eq!(user.role, UserRole::Archivist);

        repo.update_status(resp.user_id, UserStatus::Suspended).await.unwrap();
        let err = auth.token_user(resp.user_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = auth.token_user(UserId(999)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Account no longer exists");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_and_unknown_email() {
        let db = test_support::pool().await;
        let auth = test_support::auth_service(&db);
        auth.register(request("login@example.com", Some("public"))).await.unwrap();

        let ok = auth.login("LOGIN@example.com", "secret1").await.unwrap();
        assert_eq!(ok.email, "login@example.com");

        for (email, pw) in [("login@example.com", "wrong!!"), ("ghost@example.com", "secret1")] {
            let err = auth.login(email, pw).await.unwrap_err();
            assert_eq!(err.message, "Invalid email or password");
        }
    }
}
