//! Dispatch of editing server callbacks by document status.

use std::sync::Arc;

use tracing::{info, warn};

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::{DocumentStorage, RemoteFetcher};
use dochub_core::types::validate_filename;
use dochub_entity::callback::{Callback, CallbackStatus};

use crate::history::HistoryWriter;

/// Applies save notifications to stored documents.
#[derive(Debug, Clone)]
pub struct CallbackService {
    /// Document storage.
    storage: Arc<dyn DocumentStorage>,
    /// Downloads saved documents.
    fetcher: Arc<dyn RemoteFetcher>,
    /// Commits history on save.
    writer: Arc<HistoryWriter>,
}

impl CallbackService {
    /// Creates a new callback service.
    pub fn new(
        storage: Arc<dyn DocumentStorage>,
        fetcher: Arc<dyn RemoteFetcher>,
        writer: Arc<HistoryWriter>,
    ) -> Self {
        Self {
            storage,
            fetcher,
            writer,
        }
    }

    /// Handles one callback. The tenant is `callback.user_address`.
    pub async fn handle(&self, callback: &Callback) -> AppResult<()> {
        match callback.status {
            CallbackStatus::Editing | CallbackStatus::Closed => {
                info!(
                    key = %callback.key,
                    status = %callback.status,
                    users = ?callback.users,
                    "Document session update"
                );
                Ok(())
            }
            CallbackStatus::MustSave => self.save(callback).await,
            CallbackStatus::ForceSave => self.force_save(callback).await,
            CallbackStatus::SaveError | CallbackStatus::ForceSaveError => {
                warn!(
                    key = %callback.key,
                    filename = %callback.filename,
                    status = %callback.status,
                    "Editing server reported a save error"
                );
                Ok(())
            }
        }
    }

    /// Final save: the session closed with changes, so a version is committed.
    async fn save(&self, callback: &Callback) -> AppResult<()> {
        let tenant = callback.user_address.as_str();
        let filename = callback.filename.as_str();
        let content = self.download(callback).await?;

        let has_changes_url = callback
            .changesurl
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());

        if has_changes_url && self.writer.is_tracked(filename, tenant).await? {
            let version = self.writer.commit_save(callback, tenant, content).await?;
            info!(filename = %filename, tenant = %tenant, version, "Document saved");
        } else {
            warn!(
                filename = %filename,
                tenant = %tenant,
                "Saving without history: document untracked or no changes url"
            );
            self.writer.replace_content(filename, tenant, content).await?;
        }
        Ok(())
    }

    /// Force save: the session goes on, so only the live content changes.
    async fn force_save(&self, callback: &Callback) -> AppResult<()> {
        let tenant = callback.user_address.as_str();
        let content = self.download(callback).await?;
        self.writer
            .replace_content(&callback.filename, tenant, content)
            .await?;

        info!(
            filename = %callback.filename,
            tenant = %tenant,
            forcesavetype = ?callback.forcesavetype,
            "Document force-saved"
        );
        Ok(())
    }

    /// Checks the target still exists, then fetches the saved document.
    async fn download(&self, callback: &Callback) -> AppResult<bytes::Bytes> {
        validate_filename(&callback.filename)?;
        let url = callback
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::validation("Save callback carries no document url"))?;

        let path = self
            .storage
            .file_path(&callback.filename, &callback.user_address)
            .await?;
        if !self.storage.path_exists(&path).await {
            return Err(AppError::not_found(format!(
                "file {} no longer exists",
                callback.filename
            )));
        }

        self.fetcher.fetch(url).await
    }
}
