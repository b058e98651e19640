//! Feedback entity.

pub mod model;
pub mod priority;
pub mod status;

pub use model::Feedback;
pub use priority::Priority;
pub use status::FeedbackStatus;
