//! Legacy form session configuration.

use serde::{Deserialize, Serialize};

/// Cookie-backed session settings for the `/servlet/*` form flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in minutes.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "ARCHIVE_SESSION".to_string()
}
