//! Callback payload posted by the editing server.

use serde::{Deserialize, Serialize};

use super::status::CallbackStatus;
use crate::history::Change;

/// History section of a save callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackHistory {
    /// Editing server build that produced the changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
    /// Change records of the edit session that just ended.
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// A user action (connect, disconnect, force-save) reported in a callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAction {
    /// Action type code.
    #[serde(rename = "type")]
    pub kind: u8,
    /// User who performed the action.
    pub userid: String,
}

/// Save notification from the editing server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    /// Document key the session was opened with.
    #[serde(default)]
    pub key: String,
    /// Document state.
    pub status: CallbackStatus,
    /// Where to download the saved document (save statuses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Where to download the diff archive (save statuses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changesurl: Option<String>,
    /// Changes made during the session.
    #[serde(default)]
    pub history: CallbackHistory,
    /// Users with the document open.
    #[serde(default)]
    pub users: Vec<String>,
    /// Actions that triggered the callback.
    #[serde(default)]
    pub actions: Vec<CallbackAction>,
    /// Time of the last save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastsave: Option<String>,
    /// Whether the document was closed without modification.
    #[serde(default)]
    pub notmodified: bool,
    /// Force-save trigger type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forcesavetype: Option<u8>,
    /// Extension of the saved document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    /// Signed copy of this payload, when the editing server signs callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Document name on this host; filled from the callback URL.
    #[serde(default)]
    pub filename: String,
    /// Tenant address; filled from the callback URL.
    #[serde(default, rename = "userAddress")]
    pub user_address: String,
}
