//! Query-string DTOs.
//!
//! Field names follow the editing client's camelCase query parameters.

use serde::Deserialize;

/// Addresses a live document of a tenant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    /// Stored document name.
    pub file_name: String,
    /// Tenant address.
    #[serde(default)]
    pub user_address: String,
}

/// Addresses one artifact of a committed version.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactQuery {
    /// Stored document name.
    pub file_name: String,
    /// Artifact inside the slot (`prev.<ext>`, `diff.zip`, ...).
    pub file: String,
    /// Version number.
    pub ver: u32,
    /// Tenant address.
    #[serde(default)]
    pub user_address: String,
}

/// Uploader identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// Tenant address.
    #[serde(default)]
    pub user_address: String,
    /// Editor user id recorded in the initial change.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Editor display name.
    #[serde(default)]
    pub user_name: String,
}

/// Document addressed by the callback URL handed to the editing server.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Stored document name.
    pub filename: String,
    /// Tenant address.
    #[serde(default)]
    pub user_address: String,
}

fn default_user_id() -> String {
    "uid-1".to_string()
}
