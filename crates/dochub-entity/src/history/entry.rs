//! History entries presented to the editing client.

use serde::{Deserialize, Serialize};

use super::change::Change;
use crate::user::EditorUser;

/// One version in the document's history panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Change records that make up this version.
    pub changes: Vec<Change>,
    /// Timestamp of the last change record.
    pub created: String,
    /// Content-encryption key of this version.
    pub key: String,
    /// Author of the last change record.
    pub user: EditorUser,
    /// Version number, starting at 1.
    pub version: u32,
}

/// Full history payload for the editor's refresh-history event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRefresh {
    /// Number of the live (uncommitted) version, as a string.
    pub current_version: String,
    /// Entries in ascending version order; the last one is the live version.
    pub history: Vec<History>,
}
