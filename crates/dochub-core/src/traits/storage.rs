//! Document storage trait consumed by the history workflow.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Locates an artifact inside a document's history for URI generation.
///
/// A zero `version` addresses the live document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Committed version number (1-based), or 0 for the live document.
    pub version: u32,
    /// Artifact name inside the version slot (e.g. `prev.docx`, `diff.zip`).
    pub destination_path: String,
}

impl FileMeta {
    /// Meta pointing at `file` inside version slot `version`.
    pub fn artifact(version: u32, file: impl Into<String>) -> Self {
        Self {
            version,
            destination_path: file.into(),
        }
    }

    /// Whether this meta addresses the live document.
    pub fn is_live(&self) -> bool {
        self.version == 0
    }
}

/// Byte-level storage for tenant documents and their history sidecars.
///
/// Paths passed in are the absolute paths returned by [`root_folder`] and
/// [`file_path`], joined with history-layout components.
///
/// [`root_folder`]: DocumentStorage::root_folder
/// [`file_path`]: DocumentStorage::file_path
#[async_trait]
pub trait DocumentStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve (and create if needed) the root folder for a tenant address.
    ///
    /// Fails with `NotFound` when the address cannot be mapped to a folder.
    async fn root_folder(&self, tenant: &str) -> AppResult<PathBuf>;

    /// Path of the live content file for `filename` under the tenant root.
    async fn file_path(&self, filename: &str, tenant: &str) -> AppResult<PathBuf>;

    /// Read a whole file. Fails with `NotFound` when it is missing.
    async fn read_file(&self, path: &Path) -> AppResult<Bytes>;

    /// Create or truncate a file with `data`, creating parent directories.
    async fn create_file(&self, path: &Path, data: Bytes) -> AppResult<()>;

    /// Create a directory and any missing parents.
    async fn create_dir(&self, path: &Path) -> AppResult<()>;

    /// Create a single directory, failing with `Conflict` if it already exists.
    async fn create_dir_new(&self, path: &Path) -> AppResult<()>;

    /// Move a file, replacing the destination.
    async fn move_file(&self, from: &Path, to: &Path) -> AppResult<()>;

    /// Remove a file if it exists.
    async fn remove_file(&self, path: &Path) -> AppResult<()>;

    /// Remove a directory tree if it exists.
    async fn remove_dir(&self, path: &Path) -> AppResult<()>;

    /// Whether a file or directory exists.
    async fn path_exists(&self, path: &Path) -> bool;

    /// Document key for the live content of `filename`.
    ///
    /// Changes whenever the live file is replaced.
    async fn generate_file_hash(&self, filename: &str, tenant: &str) -> AppResult<String>;

    /// Public URI the editing client uses to download the live document
    /// (`meta.version == 0`) or a version artifact.
    fn generate_public_file_uri(&self, filename: &str, tenant: &str, meta: &FileMeta) -> String;

    /// A filename that does not collide with existing live documents,
    /// derived from `filename` as `name (1).ext`, `name (2).ext`, ...
    async fn versioned_filename(&self, filename: &str, tenant: &str) -> AppResult<String>;
}
