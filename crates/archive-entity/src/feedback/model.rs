//! Feedback entity model.

use archive_core::types::{DocumentId, FeedbackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::priority::Priority;
use super::status::FeedbackStatus;

/// User feedback, optionally about a specific document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Store-assigned identifier; `None` until first save.
    pub id: Option<FeedbackId>,
    /// Submitting user.
    pub user_id: UserId,
    /// Referenced document, if any.
    pub document_id: Option<DocumentId>,
    pub subject: String,
    pub message: String,
    pub status: FeedbackStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Build an unsaved, pending, normal-priority feedback entry.
    pub fn new(
        user_id: UserId,
        document_id: Option<DocumentId>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id,
            document_id,
            subject: subject.into(),
            message: message.into(),
            status: FeedbackStatus::Pending,
            priority: Priority::Normal,
            created_at: now,
            updated_at: now,
        }
    }
}
