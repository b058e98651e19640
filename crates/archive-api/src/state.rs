//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use archive_auth::JwtDecoder;
use archive_core::config::AppConfig;
use archive_database::DatabasePool;
use archive_service::{
    AnnotationService, AuthService, DashboardService, DocumentService, FeedbackService,
    UserService,
};
use archive_worker::AsyncTaskService;

use crate::handlers::legacy::session::SessionStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Cookie sessions for the form flow
    pub sessions: Arc<SessionStore>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub document_service: Arc<DocumentService>,
    pub annotation_service: Arc<AnnotationService>,
    pub feedback_service: Arc<FeedbackService>,
    pub dashboard_service: Arc<DashboardService>,

    // ── Background tasks ─────────────────────────────────────
    /// Email, notification and document processing pools
    pub tasks: AsyncTaskService,
}
