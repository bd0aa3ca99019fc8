//! Callback status codes.

use serde::{Deserialize, Serialize};

/// Document state reported by the editing server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CallbackStatus {
    /// The document is being edited.
    Editing,
    /// Editing finished; the document must be saved.
    MustSave,
    /// Saving the document failed on the editing server.
    SaveError,
    /// The document was closed without changes.
    Closed,
    /// The document is being force-saved while still open.
    ForceSave,
    /// Force-saving the document failed.
    ForceSaveError,
}

impl CallbackStatus {
    /// Whether this status carries a document to store.
    pub fn carries_document(self) -> bool {
        matches!(self, Self::MustSave | Self::ForceSave)
    }
}

impl TryFrom<u8> for CallbackStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Editing),
            2 => Ok(Self::MustSave),
            3 => Ok(Self::SaveError),
            4 => Ok(Self::Closed),
            6 => Ok(Self::ForceSave),
            7 => Ok(Self::ForceSaveError),
            other => Err(format!("unknown callback status: {other}")),
        }
    }
}

impl From<CallbackStatus> for u8 {
    fn from(status: CallbackStatus) -> Self {
        match status {
            CallbackStatus::Editing => 1,
            CallbackStatus::MustSave => 2,
            CallbackStatus::SaveError => 3,
            CallbackStatus::Closed => 4,
            CallbackStatus::ForceSave => 6,
            CallbackStatus::ForceSaveError => 7,
        }
    }
}

impl std::fmt::Display for CallbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::MustSave => write!(f, "must_save"),
            Self::SaveError => write!(f, "save_error"),
            Self::Closed => write!(f, "closed"),
            Self::ForceSave => write!(f, "force_save"),
            Self::ForceSaveError => write!(f, "force_save_error"),
        }
    }
}
