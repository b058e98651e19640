//! HTTP request handlers, one module per domain.

pub mod annotations;
pub mod async_tasks;
pub mod auth;
pub mod documents;
pub mod feedback;
pub mod health;
pub mod legacy;
pub mod users;
