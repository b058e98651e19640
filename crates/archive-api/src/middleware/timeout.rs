//! Per-request timeout.

use std::time::Duration;

use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

use archive_core::config::ServerConfig;

/// Answers `408 Request Timeout` once a request runs longer than
/// `server.request_timeout_seconds`.
pub fn build_timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_seconds),
    )
}
