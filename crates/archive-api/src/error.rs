//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use archive_core::error::{AppError, ErrorContext, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Request path, filled in by [`attach_error_path`].
    pub path: String,
    /// Entity or access details, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Handler-facing error type; wraps [`AppError`] so it can be a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Persistence
        | ErrorKind::RollbackFailed
        | ErrorKind::Internal
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn details_for(context: &ErrorContext) -> Value {
    match context {
        ErrorContext::AccessDenied {
            resource_id,
            actor_id,
            required_level,
        } => json!({
            "documentId": resource_id,
            "userId": actor_id,
            "requiredAccessLevel": required_level,
        }),
        ErrorContext::Persistence {
            operation,
            entity,
            entity_id,
        } => {
            let mut details = Map::new();
            details.insert("operation".into(), json!(operation.as_str()));
            details.insert("entityType".into(), json!(entity));
            if let Some(id) = entity_id {
                details.insert("entityId".into(), json!(id));
            }
            Value::Object(details)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                context = ?err.context,
                source = ?err.source,
                "{}",
                err.message
            );
        }

        // Server-side failures never echo driver text back to the caller.
        let message = match err.kind {
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
                "An internal error occurred".to_string()
            }
            _ => err.message.clone(),
        };

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            path: String::new(),
            details: err.context.as_ref().map(details_for),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Fills in `path` on error bodies produced by [`ApiError`].
pub async fn attach_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ErrorBody>() {
        Some(mut body) => {
            body.path = path;
            (response.status(), Json(body)).into_response()
        }
        None => response,
    }
}
