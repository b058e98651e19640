//! # archive-api
//!
//! HTTP API layer for Paperless Archive built on Axum.
//!
//! Provides the REST endpoints under `/api`, the legacy cookie-session
//! form flow under `/servlet`, middleware (CORS, logging, error paths),
//! the bearer-token extractor, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{bootstrap, build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
