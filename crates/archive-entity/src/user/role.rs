//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can register with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Curates the archive; full access, may delete documents.
    Archivist,
    /// Uploads and studies documents; needs approval.
    Researcher,
    /// Anonymous-equivalent reader.
    Public,
    /// System administrator.
    Admin,
}

impl UserRole {
    /// Resolve the role a registration form asked for.
    ///
    /// Missing or unrecognized roles fall back to [`UserRole::Public`].
    /// `admin` cannot be self-assigned and falls back the same way.
    pub fn from_registration(requested: Option<&str>) -> Self {
        requested
            .and_then(|r| r.parse().ok())
            .filter(|r| *r != Self::Admin)
            .unwrap_or(Self::Public)
    }

    /// Whether this role curates the archive (archivist or admin).
    pub fn is_curator(&self) -> bool {
        matches!(self, Self::Archivist | Self::Admin)
    }

    /// Whether this role may upload documents.
    pub fn can_upload(&self) -> bool {
        matches!(self, Self::Archivist | Self::Researcher | Self::Admin)
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archivist => "archivist",
            Self::Researcher => "researcher",
            Self::Public => "public",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = archive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "archivist" => Ok(Self::Archivist),
            "researcher" => Ok(Self::Researcher),
            "public" => Ok(Self::Public),
            "admin" => Ok(Self::Admin),
            _ => Err(archive_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: archivist, researcher, public, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("archivist".parse::<UserRole>().unwrap(), UserRole::Archivist);
        assert_eq!("RESEARCHER".parse::<UserRole>().unwrap(), UserRole::Researcher);
        assert!("librarian".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_registration_fallback() {
        assert_eq!(UserRole::from_registration(None), UserRole::Public);
        assert_eq!(UserRole::from_registration(Some("wizard")), UserRole::Public);
        assert_eq!(UserRole::from_registration(Some("admin")), UserRole::Public);
        assert_eq!(
            UserRole::from_registration(Some("researcher")),
            UserRole::Researcher
        );
    }

    #[test]
    fn test_capabilities() {
        assert!(UserRole::Admin.is_curator());
        assert!(UserRole::Archivist.is_curator());
        assert!(!UserRole::Researcher.is_curator());
        assert!(UserRole::Researcher.can_upload());
        assert!(!UserRole::Public.can_upload());
    }
}
