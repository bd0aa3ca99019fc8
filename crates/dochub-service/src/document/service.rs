//! Upload, download and removal of tracked documents.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::DocumentStorage;
use dochub_core::types::validate_filename;
use dochub_entity::history::Change;
use dochub_entity::user::EditorUser;

use crate::history::{HistoryWriter, layout};

/// Manages live documents for a tenant.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document storage.
    storage: Arc<dyn DocumentStorage>,
    /// Starts history tracking for uploads.
    writer: Arc<HistoryWriter>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(storage: Arc<dyn DocumentStorage>, writer: Arc<HistoryWriter>) -> Self {
        Self { storage, writer }
    }

    /// Stores an uploaded document under a non-colliding name and starts
    /// tracking its history. Returns the stored filename.
    pub async fn upload(
        &self,
        filename: &str,
        data: Bytes,
        tenant: &str,
        user: EditorUser,
    ) -> AppResult<String> {
        validate_filename(filename)?;
        let stored = self.storage.versioned_filename(filename, tenant).await?;
        let path = self.storage.file_path(&stored, tenant).await?;
        let size = data.len();

        self.storage.create_file(&path, data).await?;
        self.writer
            .create_meta(&stored, tenant, &[Change::now(user.clone())])
            .await?;

        info!(
            filename = %stored,
            tenant = %tenant,
            size,
            user_id = %user.id,
            "Document uploaded"
        );
        Ok(stored)
    }

    /// Deletes the live document and its whole history.
    pub async fn remove(&self, filename: &str, tenant: &str) -> AppResult<()> {
        validate_filename(filename)?;
        let root = self.storage.root_folder(tenant).await?;
        let path = self.storage.file_path(filename, tenant).await?;

        self.storage.remove_file(&path).await?;
        self.storage
            .remove_dir(&layout::history_dir(&root, filename))
            .await?;

        info!(filename = %filename, tenant = %tenant, "Document removed");
        Ok(())
    }

    /// Reads the live content of a document.
    pub async fn read_document(&self, filename: &str, tenant: &str) -> AppResult<Bytes> {
        let path = self.storage.file_path(filename, tenant).await?;
        self.storage.read_file(&path).await
    }

    /// Reads one artifact of committed version `version`.
    pub async fn read_artifact(
        &self,
        filename: &str,
        tenant: &str,
        version: u32,
        file: &str,
    ) -> AppResult<Bytes> {
        validate_filename(filename)?;
        if version == 0 {
            return Err(AppError::validation("Version numbers start at 1"));
        }
        if !layout::is_slot_artifact(filename, file) {
            return Err(AppError::validation(format!(
                "'{file}' is not a history artifact of {filename}"
            )));
        }

        let root = self.storage.root_folder(tenant).await?;
        let path = layout::slot_dir(&root, filename, version).join(file);
        self.storage.read_file(&path).await
    }
}
