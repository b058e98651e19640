//! Background task processing for Paperless Archive.
//!
//! This crate provides:
//! - [`TaskPool`], a bounded (or elastic) pool that admits fire-and-forget
//!   tasks, limits how many run at once and drains on shutdown
//! - [`AsyncTaskService`], the email, notification and document processing
//!   tasks together with the shared state they update

pub mod pool;
pub mod service;

pub use pool::TaskPool;
pub use service::{AsyncTaskService, TaskPools, TaskStats};
