//! Unified application error types for Paperless Archive.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Persistence and access-control
//! failures additionally carry an [`ErrorContext`] so the boundary layer
//! can report which entity or document was involved.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (bad credentials, unapproved account, bad token).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, dangling reference, etc.).
    Conflict,
    /// A database statement or transaction failed.
    Persistence,
    /// A failed write could not even be rolled back.
    RollbackFailed,
    /// An internal server error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Persistence => write!(f, "PERSISTENCE"),
            Self::RollbackFailed => write!(f, "ROLLBACK_FAILED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The kind of database operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DbOperation {
    /// INSERT of a new row.
    Insert,
    /// UPDATE of an existing row.
    Update,
    /// DELETE of a row.
    Delete,
    /// SELECT / aggregate query.
    Select,
    /// Transaction rollback.
    Rollback,
}

impl DbOperation {
    /// Return the operation as an upper-case SQL verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Select => "SELECT",
            Self::Rollback => "ROLLBACK",
        }
    }
}

impl fmt::Display for DbOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity-identifying context attached to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorContext {
    /// A persistence failure on a given entity type.
    Persistence {
        /// Operation that failed.
        operation: DbOperation,
        /// Entity type name (e.g. `"Document"`).
        entity: String,
        /// Identifier of the affected row, when known.
        entity_id: Option<String>,
    },
    /// An access-level mismatch on a resource.
    AccessDenied {
        /// The resource (document) identifier.
        resource_id: String,
        /// The acting user's identifier.
        actor_id: String,
        /// The access level the resource requires.
        required_level: String,
    },
}

/// The unified application error used throughout Paperless Archive.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional entity-identifying context.
    pub context: Option<ErrorContext>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach entity-identifying context.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Create a persistence error for `operation` on `entity`.
    pub fn persistence(
        operation: DbOperation,
        entity: &str,
        entity_id: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Persistence, message).with_context(ErrorContext::Persistence {
            operation,
            entity: entity.to_string(),
            entity_id,
        })
    }

    /// An INSERT of `entity` failed.
    pub fn insert_failed(entity: &str) -> Self {
        Self::persistence(
            DbOperation::Insert,
            entity,
            None,
            format!("Failed to insert {entity} into database"),
        )
    }

    /// An UPDATE of `entity` with the given id failed.
    pub fn update_failed(entity: &str, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        let message = format!("Failed to update {entity} with ID: {id}");
        Self::persistence(DbOperation::Update, entity, Some(id), message)
    }

    /// A DELETE of `entity` with the given id failed.
    pub fn delete_failed(entity: &str, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        let message = format!("Failed to delete {entity} with ID: {id}");
        Self::persistence(DbOperation::Delete, entity, Some(id), message)
    }

    /// A SELECT on `entity` failed.
    pub fn select_failed(entity: &str) -> Self {
        Self::persistence(
            DbOperation::Select,
            entity,
            None,
            format!("Failed to retrieve {entity} from database"),
        )
    }

    /// Rolling back a failed transaction itself failed.
    pub fn rollback_failed() -> Self {
        Self::new(
            ErrorKind::RollbackFailed,
            "Failed to rollback database transaction",
        )
        .with_context(ErrorContext::Persistence {
            operation: DbOperation::Rollback,
            entity: "Transaction".to_string(),
            entity_id: None,
        })
    }

    /// A user lacks the access level a document requires.
    pub fn insufficient_access_level(
        resource_id: impl fmt::Display,
        actor_id: impl fmt::Display,
        required_level: impl fmt::Display,
    ) -> Self {
        let (resource_id, actor_id, required_level) = (
            resource_id.to_string(),
            actor_id.to_string(),
            required_level.to_string(),
        );
        Self::new(
            ErrorKind::Authorization,
            format!(
                "User {actor_id} does not have sufficient access level to view document {resource_id}. Required: {required_level}"
            ),
        )
        .with_context(ErrorContext::AccessDenied {
            resource_id,
            actor_id,
            required_level,
        })
    }

    /// A suspended user attempted to read documents.
    pub fn user_suspended(actor_id: impl fmt::Display) -> Self {
        Self::authorization(format!(
            "User {actor_id} account is suspended and cannot access documents"
        ))
    }

    /// Attach an underlying cause, keeping kind, message and context.
    pub fn caused_by(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            context: self.context.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
