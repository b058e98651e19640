//! Document management with auto-tagging, checksum logging and access checks.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::{DocumentId, UserId};
use archive_database::repositories::{DocumentRepository, UserRepository};
use archive_entity::document::{ArchiveDocument, Tags};
use archive_entity::user::{AccessLevel, User, UserStatus, UserSummary};

use super::analysis::DocumentAnalysisService;
use crate::context::RequestContext;

/// An upload as received from the boundary layer.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub access_level: AccessLevel,
    /// Comma-separated tags; auto-derived when absent or blank.
    pub tags: Option<String>,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

/// Metadata changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub access_level: Option<AccessLevel>,
    /// Replacement tags; empty means derive them again.
    pub tags: Option<Vec<String>>,
}

/// A document with its uploader resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    #[serde(flatten)]
    pub document: ArchiveDocument,
    /// `None` when the uploader can no longer be resolved.
    pub uploader: Option<UserSummary>,
}

/// Archive-wide and per-user document aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total_documents: u64,
    pub user_documents: u64,
    pub user_total_size: i64,
}

/// Document service.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// User repository, for viewers and uploader summaries.
    user_repo: Arc<UserRepository>,
    /// Checksum and keyword analysis.
    analysis: Arc<DocumentAnalysisService>,
    /// Prefix of the logical storage path.
    upload_path_prefix: String,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        user_repo: Arc<UserRepository>,
        analysis: Arc<DocumentAnalysisService>,
        upload_path_prefix: impl Into<String>,
    ) -> Self {
        Self {
            document_repo,
            user_repo,
            analysis,
            upload_path_prefix: upload_path_prefix.into(),
        }
    }

    /// Persist a document, logging the content checksum and deriving tags
    /// from the title and description when none are set.
    pub async fn save_document(
        &self,
        mut document: ArchiveDocument,
        content: Option<&[u8]>,
    ) -> Result<ArchiveDocument, AppError> {
        info!(title = %document.title, "Saving document");

        if let Some(data) = content.filter(|d| !d.is_empty()) {
            let checksum = self.analysis.calculate_checksum(data);
            info!(title = %document.title, checksum = %checksum, "Document integrity checksum (SHA-256)");
        }

        if document.tags.is_empty() {
            let keywords = self.analysis.extract_keywords(&document.searchable_text());
            info!(tags = ?keywords, "Auto-generated tags");
            document.tags = Tags::new(keywords);
        }

        self.document_repo.save(&document).await
    }

    /// Handle an upload from an archivist, researcher or admin.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        upload: NewDocument,
    ) -> Result<ArchiveDocument, AppError> {
        if !ctx.role.can_upload() {
            return Err(AppError::authorization(
                "Only archivists, researchers and administrators may upload documents",
            ));
        }
        let file_name = upload.file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("A file is required"));
        }

        let mut document = ArchiveDocument::new(
            upload.title.trim(),
            file_name,
            format!("{}{}", self.upload_path_prefix, file_name),
            upload.data.len() as i64,
            ctx.user_id,
        );
        if !document.has_valid_title() {
            return Err(AppError::validation(
                "Title must be between 3 and 200 characters",
            ));
        }
        document.description = non_blank(upload.description);
        document.category = non_blank(upload.category);
        document.access_level = upload.access_level;
        document.mime_type = non_blank(upload.mime_type);
        document.tags = upload.tags.as_deref().map(Tags::parse).unwrap_or_default();

        let saved = self.save_document(document, Some(&upload.data)).await?;
        info!(document_id = ?saved.id, uploader = %ctx.user_id, "Document uploaded");
        Ok(saved)
    }

    /// Fetch a document without access checks.
    pub async fn get_document(&self, id: DocumentId) -> Result<Option<ArchiveDocument>, AppError> {
        debug!(document_id = %id, "Fetching document");
        self.document_repo.find_by_id(id).await
    }

    /// Fetch a document the caller is allowed to read, with its uploader.
    pub async fn get_for_viewer(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
    ) -> Result<DocumentDetails, AppError> {
        let viewer = self.viewer(ctx).await?;
        let document = self
            .document_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document not found with ID: {id}")))?;

        ensure_can_read(&viewer, ctx.user_id, &document)?;

        let uploader = self
            .user_repo
            .find_by_id(document.uploader_id)
            .await?
            .and_then(|u| u.summary());
        Ok(DocumentDetails { document, uploader })
    }

    /// Documents the caller may read, optionally narrowed by category or
    /// uploader.
    pub async fn list_visible(
        &self,
        ctx: &RequestContext,
        category: Option<&str>,
        uploader: Option<UserId>,
    ) -> Result<Vec<ArchiveDocument>, AppError> {
        let viewer = self.viewer(ctx).await?;
        let documents = match (category, uploader) {
            (Some(category), _) => self.document_repo.find_by_category(category).await?,
            (None, Some(uploader)) => self.document_repo.find_by_uploader(uploader).await?,
            (None, None) => self.document_repo.find_all().await?,
        };
        visible_to(&viewer, ctx.user_id, documents, uploader)
    }

    /// Case-sensitive title search, filtered to what the caller may read.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
    ) -> Result<Vec<ArchiveDocument>, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::validation("Search query must not be empty"));
        }
        debug!(query = %query, "Searching documents");
        let viewer = self.viewer(ctx).await?;
        let hits = self.document_repo.search_by_title(query).await?;
        visible_to(&viewer, ctx.user_id, hits, None)
    }

    /// Edit metadata (uploader, archivist or admin).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        update: DocumentUpdate,
    ) -> Result<ArchiveDocument, AppError> {
        let mut document = self
            .document_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document not found with ID: {id}")))?;

        if document.uploader_id != ctx.user_id && !ctx.is_curator() {
            return Err(AppError::authorization(
                "Only the uploader, archivists and administrators may edit this document",
            ));
        }

        if let Some(title) = update.title {
            document.title = title.trim().to_string();
            if !document.has_valid_title() {
                return Err(AppError::validation(
                    "Title must be between 3 and 200 characters",
                ));
            }
        }
        if let Some(description) = update.description {
            document.description = non_blank(Some(description));
        }
        if let Some(category) = update.category {
            document.category = non_blank(Some(category));
        }
        if let Some(level) = update.access_level {
            document.access_level = level;
        }
        if let Some(tags) = update.tags {
            document.tags = Tags::new(tags);
        }

        let saved = self.save_document(document, None).await?;
        info!(document_id = %id, actor = %ctx.user_id, "Document updated");
        Ok(saved)
    }

    /// Delete a document (archivist or admin).
    pub async fn delete(&self, ctx: &RequestContext, id: DocumentId) -> Result<(), AppError> {
        ctx.require_curator()?;
        info!(document_id = %id, actor = %ctx.user_id, "Deleting document");
        if !self.document_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!("Document not found with ID: {id}")));
        }
        Ok(())
    }

    /// Aggregates for the caller.
    pub async fn stats(&self, ctx: &RequestContext) -> Result<DocumentStats, AppError> {
        Ok(DocumentStats {
            total_documents: self.document_repo.count().await?,
            user_documents: self.document_repo.count_by_uploader(ctx.user_id).await?,
            user_total_size: self.document_repo.total_size_by_uploader(ctx.user_id).await?,
        })
    }

    async fn viewer(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }
}

/// Enforce the viewer's access tier against a document.
pub fn ensure_can_read(
    viewer: &User,
    viewer_id: UserId,
    document: &ArchiveDocument,
) -> Result<(), AppError> {
    if viewer.status == UserStatus::Suspended {
        return Err(AppError::user_suspended(viewer_id));
    }
    if !viewer.can_read(document.access_level) {
        let document_id = document.id.map(|id| id.to_string()).unwrap_or_default();
        return Err(AppError::insufficient_access_level(
            document_id,
            viewer_id,
            document.access_level,
        ));
    }
    Ok(())
}

fn visible_to(
    viewer: &User,
    viewer_id: UserId,
    documents: Vec<ArchiveDocument>,
    uploader: Option<UserId>,
) -> Result<Vec<ArchiveDocument>, AppError> {
    if viewer.status == UserStatus::Suspended {
        return Err(AppError::user_suspended(viewer_id));
    }
    Ok(documents
        .into_iter()
        .filter(|d| uploader.is_none_or(|u| d.uploader_id == u))
        .filter(|d| viewer.can_read(d.access_level))
        .collect())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
