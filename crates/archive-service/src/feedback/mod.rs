//! User feedback and its triage.

pub mod service;

pub use service::{FeedbackService, FeedbackUpdate, NewFeedback};
