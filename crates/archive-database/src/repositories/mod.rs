//! Transactional repository implementations for all archive entities.
//!
//! Every write runs inside a [`ScopedTransaction`](crate::ScopedTransaction):
//! the statement, the generated-key retrieval and the read-back of the stored
//! row share one transaction that is committed on success and rolled back on
//! any failure.

pub mod annotation;
pub mod document;
pub mod feedback;
pub mod user;

pub use annotation::AnnotationRepository;
pub use document::DocumentRepository;
pub use feedback::FeedbackRepository;
pub use user::UserRepository;
