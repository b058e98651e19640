//! Archived document entity model.

use archive_core::types::{DocumentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::tags::Tags;
use crate::user::AccessLevel;

/// Minimum title length in characters.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// A document held by the archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveDocument {
    /// Store-assigned identifier; `None` until first save.
    pub id: Option<DocumentId>,
    /// Title (3 to 200 characters).
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Tags, auto-derived when none are given.
    pub tags: Tags,
    /// Minimum access level needed to read this document.
    pub access_level: AccessLevel,
    /// Original upload file name.
    pub file_name: String,
    /// Logical storage path.
    pub file_path: String,
    /// Size of the upload in bytes.
    pub file_size: i64,
    /// MIME type reported by the client.
    pub mime_type: Option<String>,
    /// Uploading user.
    pub uploader_id: UserId,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ArchiveDocument {
    /// Build an unsaved document for an upload.
    pub fn new(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        file_size: i64,
        uploader_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.into(),
            description: None,
            category: None,
            tags: Tags::default(),
            access_level: AccessLevel::Public,
            file_name: file_name.into(),
            file_path: file_path.into(),
            file_size,
            mime_type: None,
            uploader_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the title length constraint.
    pub fn has_valid_title(&self) -> bool {
        let len = self.title.trim().chars().count();
        (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len)
    }

    /// Text used for keyword extraction: title followed by description.
    pub fn searchable_text(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.title, desc),
            None => self.title.clone(),
        }
    }
}
