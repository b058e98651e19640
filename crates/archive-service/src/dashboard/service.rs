use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use archive_core::error::AppError;
use archive_core::traits::Repository;
use archive_core::types::UserId;
use archive_database::repositories::{
    AnnotationRepository, DocumentRepository, FeedbackRepository, UserRepository,
};

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_documents: u64,
    pub total_annotations: u64,
    pub total_feedback: u64,
    pub user_documents: u64,
    pub user_annotations: u64,
}

/// Read-only aggregate queries across all repositories.
#[derive(Debug, Clone)]
pub struct DashboardService {
    user_repo: Arc<UserRepository>,
    document_repo: Arc<DocumentRepository>,
    annotation_repo: Arc<AnnotationRepository>,
    feedback_repo: Arc<FeedbackRepository>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        document_repo: Arc<DocumentRepository>,
        annotation_repo: Arc<AnnotationRepository>,
        feedback_repo: Arc<FeedbackRepository>,
    ) -> Self {
        Self {
            user_repo,
            document_repo,
            annotation_repo,
            feedback_repo,
        }
    }

    /// Totals plus the given user's own documents and annotations.
    pub async fn stats_for(&self, user_id: UserId) -> Result<DashboardStats, AppError> {
        debug!(user_id = %user_id, "Collecting dashboard statistics");
        Ok(DashboardStats {
            total_users: self.user_repo.count().await?,
            total_documents: self.document_repo.count().await?,
            total_annotations: self.annotation_repo.count().await?,
            total_feedback: self.feedback_repo.count().await?,
            user_documents: self.document_repo.count_by_uploader(user_id).await?,
            user_annotations: self.annotation_repo.count_by_user(user_id).await?,
        })
    }
}
