//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `{ success, message }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    /// A successful acknowledgement.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Liveness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness plus dependency checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub background_tasks: u64,
}

/// GET /api/async/send-email
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQueuedResponse {
    pub success: bool,
    pub message: String,
    pub recipient: String,
    pub thread_info: String,
}

/// POST /api/async/process-document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResponse {
    pub success: bool,
    pub message: String,
    pub document_id: String,
    pub operation: String,
    pub status: String,
}

/// POST /api/async/batch-process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub success: bool,
    pub message: String,
    pub document_count: usize,
    pub status: String,
}

/// POST /api/async/notify
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

/// GET /api/async/executor-demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorDemoResponse {
    pub success: bool,
    pub message: String,
    pub fixed_pool_tasks: usize,
    pub cached_pool_tasks: usize,
    pub info: String,
}

/// GET /api/async/cache/{documentId}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedDocumentResponse {
    pub document_id: String,
    pub result: String,
}
