//! Annotation entity model.

use archive_core::types::{AnnotationId, DocumentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::kind::AnnotationType;

/// A user's note attached to a position in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Store-assigned identifier; `None` until first save.
    pub id: Option<AnnotationId>,
    /// Annotated document.
    pub document_id: DocumentId,
    /// Author.
    pub user_id: UserId,
    /// Annotation text (required).
    pub content: String,
    /// Page number, 0 when absent.
    pub page: i64,
    /// Horizontal position, 0 when absent.
    pub position_x: f64,
    /// Vertical position, 0 when absent.
    pub position_y: f64,
    /// Rendering type.
    pub annotation_type: AnnotationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Annotation {
    /// Build an unsaved note at the origin of page 0.
    pub fn new(document_id: DocumentId, user_id: UserId, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            document_id,
            user_id,
            content: content.into(),
            page: 0,
            position_x: 0.0,
            position_y: 0.0,
            annotation_type: AnnotationType::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` wrote this annotation.
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.user_id == user
    }
}
