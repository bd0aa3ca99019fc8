//! DocHub Server - document versioning backend for an external editing server
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use tracing_subscriber::{EnvFilter, fmt};

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_core::traits::{DocumentStorage, RemoteFetcher};
use dochub_service::HttpRemoteFetcher;
use dochub_storage::LocalDocumentStorage;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/default.toml`, the `DOCHUB_ENV` overlay
/// and `DOCHUB__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DOCHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting DocHub");

    // ── Step 1: Storage ──────────────────────────────────────────
    let storage: Arc<dyn DocumentStorage> = Arc::new(LocalDocumentStorage::new(&config.storage).await?);
    tracing::info!(root = %config.storage.root_path, "Document storage initialized");

    // ── Step 2: Editing server client ────────────────────────────
    let fetcher: Arc<dyn RemoteFetcher> = Arc::new(HttpRemoteFetcher::new(&config.document_server)?);
    if config.document_server.signing_enabled() {
        tracing::info!(header = %config.document_server.jwt_header, "Token signing enabled");
    } else {
        tracing::warn!("Token signing disabled; callbacks are accepted unverified");
    }

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app_state = dochub_api::AppState::new(config, storage, fetcher);
    let app = dochub_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "DocHub server listening");

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    // In-flight requests get `shutdown_grace_seconds` to finish.
    let grace_elapsed = async move {
        if shutdown_rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        () = grace_elapsed => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Grace period elapsed, dropping open connections");
        }
    }

    tracing::info!("DocHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
