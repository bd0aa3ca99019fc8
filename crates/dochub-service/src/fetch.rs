//! HTTP retrieval of artifacts published by the editing server.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use dochub_core::config::DocumentServerConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::traits::RemoteFetcher;

/// Downloads diff archives and saved documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRemoteFetcher {
    /// Shared client with the configured request timeout.
    client: reqwest::Client,
}

impl HttpRemoteFetcher {
    /// Creates a fetcher whose requests give up after
    /// `fetch_timeout_seconds`.
    pub fn new(config: &DocumentServerConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        if url.trim().is_empty() {
            return Err(AppError::validation("Fetch URL is empty"));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Network, format!("Failed to fetch {url}"), e)
            })?;

        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::Network, format!("Failed to read body of {url}"), e)
        })?;

        debug!(url = %url, size = body.len(), "Fetched remote artifact");
        Ok(body)
    }
}
