//! Request DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use archive_core::error::AppError;
use archive_core::types::UserId;
use archive_entity::feedback::FeedbackStatus;
use archive_entity::user::{UserRole, UserStatus};
use archive_service::auth::RegisterRequest;

/// Runs `validator` rules and converts failures into a validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
        }
    }
}

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// GET /api/documents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    pub category: Option<String>,
    pub uploader_id: Option<UserId>,
}

/// GET /api/documents/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// GET /api/users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

/// GET /api/feedback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackListQuery {
    pub status: Option<FeedbackStatus>,
}

/// A task identifier sent either as a JSON string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// GET /api/async/send-email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendEmailQuery {
    #[validate(length(min = 1, message = "Recipient is required"))]
    pub recipient: String,
    pub subject: String,
}

fn default_operation() -> String {
    "index".to_string()
}

/// POST /api/async/process-document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDocumentBody {
    pub document_id: TaskId,
    #[serde(default = "default_operation")]
    pub operation: String,
}

/// POST /api/async/batch-process
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProcessBody {
    #[serde(default)]
    pub document_ids: Vec<TaskId>,
}

/// POST /api/async/notify
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyBody {
    pub user_id: TaskId,
    pub message: String,
}

/// POST /servlet/login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /servlet/register form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}
