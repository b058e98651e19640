//! Feedback submission and curator triage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::{DocumentId, FeedbackId};
use archive_database::repositories::{DocumentRepository, FeedbackRepository};
use archive_entity::feedback::{Feedback, FeedbackStatus, Priority};

use crate::context::RequestContext;

/// Longest accepted subject line.
pub const SUBJECT_MAX_LEN: usize = 200;

/// A new feedback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Feedback changes. Subject and message belong to the submitter; status
/// and priority are set by curators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<FeedbackStatus>,
    pub priority: Option<Priority>,
}

/// Feedback service.
#[derive(Debug, Clone)]
pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
    document_repo: Arc<DocumentRepository>,
}

impl FeedbackService {
    /// Creates a new feedback service.
    pub fn new(
        feedback_repo: Arc<FeedbackRepository>,
        document_repo: Arc<DocumentRepository>,
    ) -> Self {
        Self {
            feedback_repo,
            document_repo,
        }
    }

    /// Submit feedback, optionally about a document.
    pub async fn create(&self, ctx: &RequestContext, new: NewFeedback) -> Result<Feedback, AppError> {
        let subject = validate_subject(&new.subject)?;
        let message = validate_message(&new.message)?;

        if let Some(document_id) = new.document_id {
            if self.document_repo.find_by_id(document_id).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "Document not found with ID: {document_id}"
                )));
            }
        }

        let mut feedback = Feedback::new(ctx.user_id, new.document_id, subject, message);
        feedback.priority = new.priority.unwrap_or_default();

        let saved = self.feedback_repo.save(&feedback).await?;
        info!(
            feedback_id = ?saved.id,
            user_id = %ctx.user_id,
            document_id = ?new.document_id,
            "Feedback submitted"
        );
        Ok(saved)
    }

    /// Curators see everything (optionally by status); others see their own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<FeedbackStatus>,
    ) -> Result<Vec<Feedback>, AppError> {
        if ctx.is_curator() {
            return match status {
                Some(status) => self.feedback_repo.find_by_status(status).await,
                None => self.feedback_repo.find_all().await,
            };
        }
        let own = self.feedback_repo.find_by_user(ctx.user_id).await?;
        Ok(own
            .into_iter()
            .filter(|f| status.is_none_or(|s| f.status == s))
            .collect())
    }

    /// Feedback about a document; non-curators only see their own.
    pub async fn list_for_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
    ) -> Result<Vec<Feedback>, AppError> {
        let all = self.feedback_repo.find_by_document(document_id).await?;
        if ctx.is_curator() {
            return Ok(all);
        }
        Ok(all.into_iter().filter(|f| f.user_id == ctx.user_id).collect())
    }

    /// Fetch one entry (submitter or curator).
    pub async fn get(&self, ctx: &RequestContext, id: FeedbackId) -> Result<Feedback, AppError> {
        let feedback = self.load(id).await?;
        ensure_owner_or_curator(ctx, &feedback)?;
        Ok(feedback)
    }

    /// Edit an entry.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: FeedbackId,
        update: FeedbackUpdate,
    ) -> Result<Feedback, AppError> {
        let mut feedback = self.load(id).await?;
        ensure_owner_or_curator(ctx, &feedback)?;

        if (update.status.is_some() || update.priority.is_some()) && !ctx.is_curator() {
            return Err(AppError::authorization(
                "Only archivists and administrators may change feedback status or priority",
            ));
        }

        if let Some(subject) = update.subject {
            feedback.subject = validate_subject(&subject)?.to_string();
        }
        if let Some(message) = update.message {
            feedback.message = validate_message(&message)?.to_string();
        }
        if let Some(status) = update.status {
            feedback.status = status;
        }
        if let Some(priority) = update.priority {
            feedback.priority = priority;
        }

        let saved = self.feedback_repo.save(&feedback).await?;
        info!(
            feedback_id = %id,
            actor = %ctx.user_id,
            status = %saved.status,
            priority = %saved.priority,
            "Feedback updated"
        );
        Ok(saved)
    }

    /// Delete an entry (submitter or curator).
    pub async fn delete(&self, ctx: &RequestContext, id: FeedbackId) -> Result<(), AppError> {
        let feedback = self.load(id).await?;
        ensure_owner_or_curator(ctx, &feedback)?;
        if !self.feedback_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!("Feedback not found with ID: {id}")));
        }
        info!(feedback_id = %id, actor = %ctx.user_id, "Feedback deleted");
        Ok(())
    }

    async fn load(&self, id: FeedbackId) -> Result<Feedback, AppError> {
        self.feedback_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Feedback not found with ID: {id}")))
    }
}

fn ensure_owner_or_curator(ctx: &RequestContext, feedback: &Feedback) -> Result<(), AppError> {
    if feedback.user_id == ctx.user_id || ctx.is_curator() {
        Ok(())
    } else {
        Err(AppError::authorization(
            "You may only access your own feedback",
        ))
    }
}

fn validate_subject(subject: &str) -> Result<&str, AppError> {
    let subject = subject.trim();
    if subject.is_empty() || subject.chars().count() > SUBJECT_MAX_LEN {
        return Err(AppError::validation(
            "Subject must be between 1 and 200 characters",
        ));
    }
    Ok(subject)
}

fn validate_message(message: &str) -> Result<&str, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::validation("Message is required"));
    }
    Ok(message)
}
