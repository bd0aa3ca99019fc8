//! # dochub-api
//!
//! HTTP API layer for DocHub built on Axum.
//!
//! Serves the editing client (history, downloads, uploads) and receives
//! save callbacks from the editing server.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
