//! Document handlers: list, search, stats, get, upload, update, delete.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;

use archive_core::error::AppError;
use archive_core::types::DocumentId;
use archive_entity::document::ArchiveDocument;
use archive_entity::user::AccessLevel;
use archive_service::document::{DocumentDetails, DocumentStats, DocumentUpdate, NewDocument};

use crate::dto::request::{DocumentListQuery, SearchQuery};
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DocumentListQuery>,
) -> ApiResult<Json<Vec<ArchiveDocument>>> {
    let documents = state
        .document_service
        .list_visible(&auth, query.category.as_deref(), query.uploader_id)
        .await?;
    Ok(Json(documents))
}

/// GET /api/documents/search?query=
pub async fn search_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ArchiveDocument>>> {
    let documents = state.document_service.search(&auth, &query.query).await?;
    Ok(Json(documents))
}

/// GET /api/documents/stats/overview
pub async fn document_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DocumentStats>> {
    Ok(Json(state.document_service.stats(&auth).await?))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<Json<DocumentDetails>> {
    let details = state.document_service.get_for_viewer(&auth, id).await?;
    Ok(Json(details))
}

/// POST /api/documents (multipart)
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ArchiveDocument>)> {
    let mut upload = NewDocument {
        title: String::new(),
        description: None,
        category: None,
        access_level: AccessLevel::Public,
        tags: None,
        file_name: String::new(),
        mime_type: None,
        data: Bytes::new(),
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().unwrap_or_default().to_string();
                upload.mime_type = field.content_type().map(str::to_string);
                upload.data = field.bytes().await.map_err(multipart_error)?;
            }
            "title" => upload.title = field.text().await.map_err(multipart_error)?,
            "description" => {
                upload.description = Some(field.text().await.map_err(multipart_error)?)
            }
            "category" => upload.category = Some(field.text().await.map_err(multipart_error)?),
            "tags" => upload.tags = Some(field.text().await.map_err(multipart_error)?),
            "accessLevel" => {
                let raw = field.text().await.map_err(multipart_error)?;
                if !raw.trim().is_empty() {
                    upload.access_level = raw.trim().parse()?;
                }
            }
            other => tracing::debug!(field = %other, "Ignoring unknown upload field"),
        }
    }

    let document = state.document_service.upload(&auth, upload).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocumentId>,
    Json(update): Json<DocumentUpdate>,
) -> ApiResult<Json<ArchiveDocument>> {
    let document = state.document_service.update(&auth, id, update).await?;
    Ok(Json(document))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<StatusCode> {
    state.document_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn multipart_error(err: MultipartError) -> ApiError {
    AppError::validation(format!("Invalid multipart body: {}", err.body_text())).into()
}
