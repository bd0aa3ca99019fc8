//! Version history handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Response;
use tracing::warn;

use crate::dto::request::{ArtifactQuery, DocumentQuery};
use crate::dto::response::HistoryResponse;
use crate::error::ApiError;
use crate::handlers::attachment;
use crate::state::AppState;

/// GET /api/history
///
/// The editor opens regardless of history, so failures yield an empty
/// history instead of an error status.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Json<HistoryResponse> {
    match state
        .history_builder
        .get_history(&query.file_name, &query.user_address)
        .await
    {
        Ok((ref_hist, set_hist)) => Json(HistoryResponse { ref_hist, set_hist }),
        Err(e) => {
            warn!(
                filename = %query.file_name,
                tenant = %query.user_address,
                kind = %e.kind,
                error = %e.message,
                "Could not build history"
            );
            Json(HistoryResponse::default())
        }
    }
}

/// GET /api/history/download
pub async fn download_artifact(
    State(state): State<AppState>,
    Query(query): Query<ArtifactQuery>,
) -> Result<Response, ApiError> {
    let data = state
        .document_service
        .read_artifact(&query.file_name, &query.user_address, query.ver, &query.file)
        .await?;

    Ok(attachment(&query.file, data)?)
}
