//! Annotation type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an annotation is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    /// Highlighted passage.
    Highlight,
    /// Free-standing note.
    #[default]
    Note,
    /// Comment on a passage.
    Comment,
}

impl AnnotationType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Note => "note",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnnotationType {
    type Err = archive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highlight" => Ok(Self::Highlight),
            "note" => Ok(Self::Note),
            "comment" => Ok(Self::Comment),
            _ => Err(archive_core::AppError::validation(format!(
                "Invalid annotation type: '{s}'. Expected one of: highlight, note, comment"
            ))),
        }
    }
}
