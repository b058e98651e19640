//! Access level tiers shared by users and documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse authorization tier, distinct from role.
///
/// Tiers are ordered: `Public < Restricted < Full`. A user may read a
/// document when the user's tier is at least the document's tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Readable by everyone.
    #[default]
    Public,
    /// Readable by researchers and archivists.
    Restricted,
    /// Readable only with full access.
    Full,
}

impl AccessLevel {
    /// Whether holding `self` grants access to material at `required`.
    pub fn permits(&self, required: AccessLevel) -> bool {
        *self >= required
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = archive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            "full" => Ok(Self::Full),
            _ => Err(archive_core::AppError::validation(format!(
                "Invalid access level: '{s}'. Expected one of: public, restricted, full"
            ))),
        }
    }
}
