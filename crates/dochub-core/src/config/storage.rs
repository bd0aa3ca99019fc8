//! Document storage configuration.

use serde::{Deserialize, Serialize};

/// Local document storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory under which every tenant gets its own root folder.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Base URL the editing server uses to reach this host. Public file
    /// URIs handed to the editor are built on top of it.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_url: default_public_url(),
        }
    }
}

fn default_root_path() -> String {
    "./data/files".to_string()
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}
