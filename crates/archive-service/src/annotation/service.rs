//! Annotation authoring with document visibility checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::{AnnotationId, DocumentId};
use archive_database::repositories::{AnnotationRepository, DocumentRepository, UserRepository};
use archive_entity::annotation::{Annotation, AnnotationType};
use archive_entity::document::ArchiveDocument;

use crate::context::RequestContext;
use crate::document::service::ensure_can_read;

/// A new annotation on a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnotation {
    pub document_id: DocumentId,
    pub content: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub position_x: Option<f64>,
    #[serde(default)]
    pub position_y: Option<f64>,
    #[serde(default)]
    pub annotation_type: Option<AnnotationType>,
}

/// Author-only changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationUpdate {
    pub content: Option<String>,
    pub page: Option<i64>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub annotation_type: Option<AnnotationType>,
}

/// Annotation service.
#[derive(Debug, Clone)]
pub struct AnnotationService {
    annotation_repo: Arc<AnnotationRepository>,
    document_repo: Arc<DocumentRepository>,
    user_repo: Arc<UserRepository>,
}

impl AnnotationService {
    /// Creates a new annotation service.
    pub fn new(
        annotation_repo: Arc<AnnotationRepository>,
        document_repo: Arc<DocumentRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            annotation_repo,
            document_repo,
            user_repo,
        }
    }

    /// Annotations of a document the caller may read, by page.
    pub async fn list_for_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
    ) -> Result<Vec<Annotation>, AppError> {
        self.readable_document(ctx, document_id).await?;
        self.annotation_repo.find_by_document(document_id).await
    }

    /// The caller's own annotations.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Annotation>, AppError> {
        self.annotation_repo.find_by_user(ctx.user_id).await
    }

    /// Annotate a document the caller may read.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        new: NewAnnotation,
    ) -> Result<Annotation, AppError> {
        let content = new.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Annotation content is required"));
        }
        self.readable_document(ctx, new.document_id).await?;

        let mut annotation = Annotation::new(new.document_id, ctx.user_id, content);
        annotation.page = new.page.unwrap_or(0);
        annotation.position_x = new.position_x.unwrap_or(0.0);
        annotation.position_y = new.position_y.unwrap_or(0.0);
        annotation.annotation_type = new.annotation_type.unwrap_or_default();

        let saved = self.annotation_repo.save(&annotation).await?;
        info!(
            annotation_id = ?saved.id,
            document_id = %new.document_id,
            user_id = %ctx.user_id,
            "Annotation created"
        );
        Ok(saved)
    }

    /// Edit an annotation (author only).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: AnnotationId,
        update: AnnotationUpdate,
    ) -> Result<Annotation, AppError> {
        let mut annotation = self.load(id).await?;
        if !annotation.is_authored_by(ctx.user_id) {
            return Err(AppError::authorization(
                "Only the author may edit this annotation",
            ));
        }

        if let Some(content) = update.content {
            let content = content.trim();
            if content.is_empty() {
                return Err(AppError::validation("Annotation content is required"));
            }
            annotation.content = content.to_string();
        }
        if let Some(page) = update.page {
            annotation.page = page;
        }
        if let Some(x) = update.position_x {
            annotation.position_x = x;
        }
        if let Some(y) = update.position_y {
            annotation.position_y = y;
        }
        if let Some(kind) = update.annotation_type {
            annotation.annotation_type = kind;
        }

        self.annotation_repo.save(&annotation).await
    }

    /// Delete an annotation (author, archivist or admin).
    pub async fn delete(&self, ctx: &RequestContext, id: AnnotationId) -> Result<(), AppError> {
        let annotation = self.load(id).await?;
        if !annotation.is_authored_by(ctx.user_id) && !ctx.is_curator() {
            return Err(AppError::authorization(
                "Only the author, archivists and administrators may delete this annotation",
            ));
        }
        if !self.annotation_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!("Annotation not found with ID: {id}")));
        }
        info!(annotation_id = %id, actor = %ctx.user_id, "Annotation deleted");
        Ok(())
    }

    async fn load(&self, id: AnnotationId) -> Result<Annotation, AppError> {
        self.annotation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Annotation not found with ID: {id}")))
    }

    async fn readable_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
    ) -> Result<ArchiveDocument, AppError> {
        let document = self
            .document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Document not found with ID: {document_id}"))
            })?;
        let viewer = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        ensure_can_read(&viewer, ctx.user_id, &document)?;
        Ok(document)
    }
}
