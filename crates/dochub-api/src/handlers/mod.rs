//! HTTP request handlers.

pub mod callback;
pub mod document;
pub mod health;
pub mod history;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use dochub_core::error::AppError;
use dochub_storage::mime_from_path;

/// Builds an attachment response for raw file bytes.
pub(crate) fn attachment(name: &str, data: Bytes) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            mime_from_path(name).unwrap_or("application/octet-stream"),
        )
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name.replace('"', "")),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}
