//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Administrator created at startup when no account holds its email.
    #[serde(default)]
    pub initial_admin: Option<InitialAdminConfig>,
}

/// Bootstrap administrator credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialAdminConfig {
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password; hashed before it is stored.
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            password_min_length: default_password_min(),
            initial_admin: None,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    24 * 60
}

fn default_password_min() -> usize {
    6
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}
