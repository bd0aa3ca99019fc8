//! Users as referenced by change records and callbacks.

use serde::{Deserialize, Serialize};

/// A user reference stored inside change records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorUser {
    /// Stable user identifier (e.g. `uid-1`).
    pub id: String,
    /// Display name shown in the version history panel.
    #[serde(default)]
    pub name: String,
}

impl EditorUser {
    /// Creates a user reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
