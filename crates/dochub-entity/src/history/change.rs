//! Change record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::EditorUser;

/// Timestamp layout used in change logs.
pub const CHANGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One edit recorded in a change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// When the edit happened, formatted with [`CHANGE_TIME_FORMAT`].
    pub created: String,
    /// Who made the edit.
    pub user: EditorUser,
}

impl Change {
    /// Creates a change record stamped at `at`.
    pub fn at(at: DateTime<Utc>, user: EditorUser) -> Self {
        Self {
            created: at.format(CHANGE_TIME_FORMAT).to_string(),
            user,
        }
    }

    /// Creates a change record stamped with the current time.
    pub fn now(user: EditorUser) -> Self {
        Self::at(Utc::now(), user)
    }
}
