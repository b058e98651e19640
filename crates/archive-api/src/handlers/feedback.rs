//! Feedback handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use archive_core::types::{DocumentId, FeedbackId};
use archive_entity::feedback::Feedback;
use archive_service::feedback::{FeedbackUpdate, NewFeedback};

use crate::dto::request::FeedbackListQuery;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FeedbackListQuery>,
) -> ApiResult<Json<Vec<Feedback>>> {
    Ok(Json(state.feedback_service.list(&auth, query.status).await?))
}

/// GET /api/feedback/document/{documentId}
pub async fn list_for_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(document_id): Path<DocumentId>,
) -> ApiResult<Json<Vec<Feedback>>> {
    let feedback = state
        .feedback_service
        .list_for_document(&auth, document_id)
        .await?;
    Ok(Json(feedback))
}

/// POST /api/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(new): Json<NewFeedback>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    let feedback = state.feedback_service.create(&auth, new).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// GET /api/feedback/{id}
pub async fn get_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FeedbackId>,
) -> ApiResult<Json<Feedback>> {
    Ok(Json(state.feedback_service.get(&auth, id).await?))
}

/// PUT /api/feedback/{id}
pub async fn update_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FeedbackId>,
    Json(update): Json<FeedbackUpdate>,
) -> ApiResult<Json<Feedback>> {
    Ok(Json(state.feedback_service.update(&auth, id, update).await?))
}

/// DELETE /api/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FeedbackId>,
) -> ApiResult<StatusCode> {
    state.feedback_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
