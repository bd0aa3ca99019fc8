//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dochub_auth::{CallbackTokenDecoder, JwtSigner};
use dochub_core::config::AppConfig;
use dochub_core::traits::{DocumentStorage, RemoteFetcher, TokenSigner};
use dochub_service::{CallbackService, CommitLocks, DocumentService, HistoryBuilder, HistoryWriter};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document storage
    pub storage: Arc<dyn DocumentStorage>,

    // ── Auth ─────────────────────────────────────────────────
    /// Callback token verifier; `None` when signing is disabled
    pub callback_decoder: Option<Arc<CallbackTokenDecoder>>,

    // ── Services ─────────────────────────────────────────────
    /// History builder
    pub history_builder: Arc<HistoryBuilder>,
    /// Upload, download and removal of documents
    pub document_service: Arc<DocumentService>,
    /// Editing server callback handling
    pub callback_service: Arc<CallbackService>,
}

impl AppState {
    /// Wires services around the given storage and fetcher.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn DocumentStorage>,
        fetcher: Arc<dyn RemoteFetcher>,
    ) -> Self {
        let signer = JwtSigner::from_config(&config.document_server)
            .map(|s| Arc::new(s) as Arc<dyn TokenSigner>);
        let callback_decoder =
            CallbackTokenDecoder::from_config(&config.document_server).map(Arc::new);

        let history_builder = Arc::new(HistoryBuilder::new(Arc::clone(&storage), signer));
        let history_writer = Arc::new(HistoryWriter::new(
            Arc::clone(&storage),
            Arc::clone(&fetcher),
            CommitLocks::new(),
            config.document_server.commit_retries,
        ));
        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&storage),
            Arc::clone(&history_writer),
        ));
        let callback_service = Arc::new(CallbackService::new(
            Arc::clone(&storage),
            fetcher,
            history_writer,
        ));

        Self {
            config: Arc::new(config),
            storage,
            callback_decoder,
            history_builder,
            document_service,
            callback_service,
        }
    }
}
