//! # archive-service
//!
//! Business logic service layer for Paperless Archive. Each service wraps
//! one or more repositories with the archive's rules: role to access-level
//! mapping at registration, auto-tagging and checksum logging on upload,
//! and access-level enforcement on reads.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod annotation;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod document;
pub mod feedback;
pub mod user;

pub use annotation::AnnotationService;
pub use auth::AuthService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use document::{DocumentAnalysisService, DocumentService};
pub use feedback::FeedbackService;
pub use user::UserService;
