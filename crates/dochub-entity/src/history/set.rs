//! History sets: per-version URL bundles, optionally signed.

use serde::{Deserialize, Serialize};

/// Key and content URL of the version preceding a history set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPrevious {
    /// Content-encryption key of the previous version.
    pub key: String,
    /// URL of the previous version's content snapshot.
    pub url: String,
}

/// Data the editing client needs to open one historical version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySet {
    /// URL of the diff archive against the previous version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_url: Option<String>,
    /// Content-encryption key of this version.
    pub key: String,
    /// URL of this version's content.
    pub url: String,
    /// Version number.
    pub version: u32,
    /// Present on versions after the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<HistoryPrevious>,
    /// Signed token over the other fields, when signing is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
