//! Route definitions for the DocHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.server.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(history_routes())
        .merge(callback_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Live documents: upload, download, delete
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::document::upload))
        .route("/download", get(handlers::document::download))
        .route("/files", delete(handlers::document::remove))
}

/// Version history and its artifacts
fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::history::get_history))
        .route("/history/download", get(handlers::history::download_artifact))
}

/// Editing server callbacks
fn callback_routes() -> Router<AppState> {
    Router::new().route("/callback", post(handlers::callback::callback))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
