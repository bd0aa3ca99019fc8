//! Request/response logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, warn};

/// Logs request method, path, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status, duration_ms, "HTTP request failed");
    } else {
        info!(method = %method, path = %path, status, duration_ms, "HTTP request");
    }

    response
}
