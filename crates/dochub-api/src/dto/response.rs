//! Response DTOs.

use serde::{Deserialize, Serialize};

use dochub_entity::history::{HistoryRefresh, HistorySet};

/// Liveness check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Version history handed to the editing client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Timeline for the history panel.
    pub ref_hist: HistoryRefresh,
    /// Per-version bundles, index-aligned with `ref_hist.history`.
    pub set_hist: Vec<HistorySet>,
}

/// Name under which an upload was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored filename.
    pub filename: String,
}

/// Result code the editing server expects: `0` on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `0` success, `1` failure.
    pub error: u8,
}

impl StatusResponse {
    /// Success.
    pub fn ok() -> Self {
        Self { error: 0 }
    }

    /// Failure.
    pub fn failed() -> Self {
        Self { error: 1 }
    }
}
