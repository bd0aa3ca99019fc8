//! Editing server callback handler.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use bytes::Bytes;
use tracing::{debug, warn};

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_entity::callback::Callback;

use crate::dto::request::CallbackQuery;
use crate::dto::response::StatusResponse;
use crate::state::AppState;

/// POST /api/callback
///
/// The editing server only understands `{"error":0}` and `{"error":1}`, so
/// every failure is logged and reported as `1` with a 200 status.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<StatusResponse> {
    match process(&state, query, &headers, &body).await {
        Ok(()) => Json(StatusResponse::ok()),
        Err(e) => {
            warn!(kind = %e.kind, error = %e.message, "Callback rejected");
            Json(StatusResponse::failed())
        }
    }
}

async fn process(
    state: &AppState,
    query: CallbackQuery,
    headers: &HeaderMap,
    body: &[u8],
) -> AppResult<()> {
    if query.filename.trim().is_empty() || query.user_address.trim().is_empty() {
        return Err(AppError::validation("Callback url lacks filename or user address"));
    }

    let mut callback: Callback = serde_json::from_slice(body)?;
    callback.filename = query.filename;
    callback.user_address = query.user_address;

    let callback = match &state.callback_decoder {
        Some(decoder) => {
            let header = headers
                .get(state.config.document_server.jwt_header.as_str())
                .and_then(|v| v.to_str().ok());
            decoder.decode_callback(&callback, header)?
        }
        None => callback,
    };

    debug!(
        filename = %callback.filename,
        tenant = %callback.user_address,
        status = %callback.status,
        "Callback received"
    );
    state.callback_service.handle(&callback).await
}
