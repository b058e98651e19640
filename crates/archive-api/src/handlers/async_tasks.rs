//! Background task handlers under `/api/async`.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use archive_core::error::AppError;
use archive_worker::TaskStats;

use crate::dto::request::{
    BatchProcessBody, NotifyBody, ProcessDocumentBody, SendEmailQuery, validate_request,
};
use crate::dto::response::{
    BatchResponse, CachedDocumentResponse, EmailQueuedResponse, ExecutorDemoResponse,
    MessageResponse, NotifyResponse, ProcessingResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/async/send-email?recipient=&subject=
pub async fn send_email(
    State(state): State<AppState>,
    Query(query): Query<SendEmailQuery>,
) -> ApiResult<Json<EmailQueuedResponse>> {
    validate_request(&query)?;
    let _pending = state.tasks.send_email(query.recipient.clone(), query.subject)?;
    Ok(Json(EmailQueuedResponse {
        success: true,
        message: "Email is being sent asynchronously".to_string(),
        recipient: query.recipient,
        thread_info: "Processing in background task pool".to_string(),
    }))
}

/// POST /api/async/process-document
pub async fn process_document(
    State(state): State<AppState>,
    Json(body): Json<ProcessDocumentBody>,
) -> ApiResult<(StatusCode, Json<ProcessingResponse>)> {
    let document_id = body.document_id.to_string();
    let _pending = state
        .tasks
        .process_document(document_id.clone(), body.operation.clone())?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ProcessingResponse {
            success: true,
            message: "Document processing started".to_string(),
            document_id,
            operation: body.operation,
            status: "processing".to_string(),
        }),
    ))
}

/// POST /api/async/batch-process
pub async fn batch_process(
    State(state): State<AppState>,
    Json(body): Json<BatchProcessBody>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    let ids: Vec<String> = body.document_ids.iter().map(ToString::to_string).collect();
    let document_count = ids.len();
    let _pending = state.tasks.batch_process(ids)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(BatchResponse {
            success: true,
            message: "Batch processing started".to_string(),
            document_count,
            status: "processing".to_string(),
        }),
    ))
}

/// POST /api/async/notify
pub async fn notify(
    State(state): State<AppState>,
    Json(body): Json<NotifyBody>,
) -> ApiResult<Json<NotifyResponse>> {
    let user_id = body.user_id.to_string();
    let _pending = state.tasks.send_notification(user_id.clone(), body.message)?;
    Ok(Json(NotifyResponse {
        success: true,
        message: "Notification sent asynchronously".to_string(),
        user_id,
    }))
}

/// GET /api/async/stats
pub async fn stats(State(state): State<AppState>) -> Json<TaskStats> {
    Json(state.tasks.stats().await)
}

/// GET /api/async/executor-demo
pub async fn executor_demo(
    State(state): State<AppState>,
) -> ApiResult<Json<ExecutorDemoResponse>> {
    let (fixed_pool_tasks, cached_pool_tasks) = state.tasks.executor_demo()?;
    Ok(Json(ExecutorDemoResponse {
        success: true,
        message: "Executor demo tasks submitted".to_string(),
        fixed_pool_tasks,
        cached_pool_tasks,
        info: "Check server logs to see task execution".to_string(),
    }))
}

/// POST /api/async/clear-cache
pub async fn clear_cache(State(state): State<AppState>) -> Json<MessageResponse> {
    state.tasks.clear_cache().await;
    Json(MessageResponse::ok("Cache cleared successfully"))
}

/// GET /api/async/cache/{documentId}
pub async fn cached_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<CachedDocumentResponse>> {
    let result = state
        .tasks
        .cached_document(&document_id)
        .await
        .ok_or_else(|| {
            AppError::not_found(format!("No cached result for document {document_id}"))
        })?;
    Ok(Json(CachedDocumentResponse {
        document_id,
        result,
    }))
}
