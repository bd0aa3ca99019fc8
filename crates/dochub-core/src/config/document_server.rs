//! Editing server integration configuration.

use serde::{Deserialize, Serialize};

/// Settings shared with the external document-editing server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentServerConfig {
    /// Shared HMAC secret used to sign history sets and verify callbacks.
    #[serde(default)]
    pub jwt_secret: String,
    /// Whether token signing is switched on at all.
    #[serde(default)]
    pub jwt_enabled: bool,
    /// Header carrying the callback token (`Bearer <token>`).
    #[serde(default = "default_jwt_header")]
    pub jwt_header: String,
    /// Timeout for fetching diff archives and saved documents.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    /// How many times a commit rescans for a free version slot after
    /// losing a race for one.
    #[serde(default = "default_commit_retries")]
    pub commit_retries: u32,
}

impl DocumentServerConfig {
    /// Signing is active only with a non-blank secret and the flag on.
    pub fn signing_enabled(&self) -> bool {
        self.jwt_enabled && !self.jwt_secret.trim().is_empty()
    }
}

impl Default for DocumentServerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_enabled: false,
            jwt_header: default_jwt_header(),
            fetch_timeout_seconds: default_fetch_timeout(),
            commit_retries: default_commit_retries(),
        }
    }
}

fn default_jwt_header() -> String {
    "Authorization".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_commit_retries() -> u32 {
    5
}
