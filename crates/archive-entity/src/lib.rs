//! Domain entity models for Paperless Archive.
//!
//! Entities are plain records mapped with `sqlx::FromRow`. Identifiers are
//! `None` until the repository assigns a store-generated key, and
//! cross-references are plain ids resolved on demand by the service layer.

pub mod annotation;
pub mod document;
pub mod feedback;
pub mod user;

pub use annotation::{Annotation, AnnotationType};
pub use document::{ArchiveDocument, Tags};
pub use feedback::{Feedback, FeedbackStatus, Priority};
pub use user::{AccessLevel, User, UserRole, UserStatus, UserSummary};
