//! Remote artifact fetching.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Downloads artifacts published by the editing server (diff archives and
/// saved document content).
///
/// Failures map to [`crate::error::ErrorKind::Network`].
#[async_trait]
pub trait RemoteFetcher: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the full body at `url`.
    async fn fetch(&self, url: &str) -> AppResult<Bytes>;
}
