//! Annotation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use archive_core::types::{AnnotationId, DocumentId};
use archive_entity::annotation::Annotation;
use archive_service::annotation::{AnnotationUpdate, NewAnnotation};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/annotations/document/{documentId}
pub async fn list_for_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(document_id): Path<DocumentId>,
) -> ApiResult<Json<Vec<Annotation>>> {
    let annotations = state
        .annotation_service
        .list_for_document(&auth, document_id)
        .await?;
    Ok(Json(annotations))
}

/// GET /api/annotations/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Annotation>>> {
    Ok(Json(state.annotation_service.list_mine(&auth).await?))
}

/// POST /api/annotations
pub async fn create_annotation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(new): Json<NewAnnotation>,
) -> ApiResult<(StatusCode, Json<Annotation>)> {
    let annotation = state.annotation_service.create(&auth, new).await?;
    Ok((StatusCode::CREATED, Json(annotation)))
}

/// PUT /api/annotations/{id}
pub async fn update_annotation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AnnotationId>,
    Json(update): Json<AnnotationUpdate>,
) -> ApiResult<Json<Annotation>> {
    Ok(Json(state.annotation_service.update(&auth, id, update).await?))
}

/// DELETE /api/annotations/{id}
pub async fn delete_annotation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AnnotationId>,
) -> ApiResult<StatusCode> {
    state.annotation_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
