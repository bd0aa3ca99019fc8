//! Live document handlers.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::response::Response;
use bytes::Bytes;

use dochub_core::error::AppError;
use dochub_entity::user::EditorUser;

use crate::dto::request::{DocumentQuery, UploadQuery};
use crate::dto::response::{StatusResponse, UploadResponse};
use crate::error::ApiError;
use crate::handlers::attachment;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const UPLOAD_FIELD: &str = "uploadedFile";

/// POST /api/upload
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        file_name = field.file_name().map(String::from);
        data = Some(
            field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
        );
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("uploadedFile is required"))?;
    let data = data.ok_or_else(|| AppError::validation("uploadedFile data is required"))?;

    let filename = state
        .document_service
        .upload(
            &file_name,
            data,
            &query.user_address,
            EditorUser::new(query.user_id, query.user_name),
        )
        .await?;

    Ok(Json(UploadResponse { filename }))
}

/// GET /api/download
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<Response, ApiError> {
    let data = state
        .document_service
        .read_document(&query.file_name, &query.user_address)
        .await?;

    Ok(attachment(&query.file_name, data)?)
}

/// DELETE /api/files
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .document_service
        .remove(&query.file_name, &query.user_address)
        .await?;

    Ok(Json(StatusResponse::ok()))
}
