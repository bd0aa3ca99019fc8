//! Committing a finished edit session into an immutable version slot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::traits::{DocumentStorage, RemoteFetcher};
use dochub_core::types::validate_filename;
use dochub_entity::callback::Callback;
use dochub_entity::history::Change;

use super::layout;
use super::lock::CommitLocks;

/// Rolls live metadata and content into numbered version slots.
#[derive(Debug, Clone)]
pub struct HistoryWriter {
    /// Document storage.
    storage: Arc<dyn DocumentStorage>,
    /// Downloads the diff archive published by the editing server.
    fetcher: Arc<dyn RemoteFetcher>,
    /// Serialises commits per document.
    locks: CommitLocks,
    /// Rescans after losing a slot race before giving up.
    commit_retries: u32,
}

/// Paths touched by one roll.
struct Roll {
    slot: PathBuf,
    live_meta: PathBuf,
    live_content: PathBuf,
}

/// Which destructive steps of a roll have completed.
#[derive(Default)]
struct RollProgress {
    meta_moved: bool,
    content_moved: bool,
}

impl HistoryWriter {
    /// Creates a new history writer.
    pub fn new(
        storage: Arc<dyn DocumentStorage>,
        fetcher: Arc<dyn RemoteFetcher>,
        locks: CommitLocks,
        commit_retries: u32,
    ) -> Self {
        Self {
            storage,
            fetcher,
            locks,
            commit_retries,
        }
    }

    /// Whether `filename` has live metadata, i.e. its history is tracked.
    pub async fn is_tracked(&self, filename: &str, tenant: &str) -> AppResult<bool> {
        let root = self.storage.root_folder(tenant).await?;
        Ok(self
            .storage
            .path_exists(&layout::live_meta_path(&root, filename))
            .await)
    }

    /// Starts tracking `filename` with an initial live change log.
    pub async fn create_meta(&self, filename: &str, tenant: &str, changes: &[Change]) -> AppResult<()> {
        validate_filename(filename)?;
        let root = self.storage.root_folder(tenant).await?;
        self.storage
            .create_dir(&layout::history_dir(&root, filename))
            .await?;
        self.storage
            .create_file(
                &layout::live_meta_path(&root, filename),
                Bytes::from(serde_json::to_vec(changes)?),
            )
            .await?;

        debug!(filename = %filename, tenant = %tenant, changes = changes.len(), "Live metadata created");
        Ok(())
    }

    /// Commits the edit session described by `callback` as the next version
    /// and returns its number.
    ///
    /// The live content is moved into the slot as `prev.<ext>`; the caller is
    /// expected to write the new content afterwards.
    pub async fn create_history(&self, callback: &Callback, tenant: &str) -> AppResult<u32> {
        self.commit(callback, tenant, None).await
    }

    /// Commits the edit session and replaces the live content with
    /// `content` under the same document lock.
    pub async fn commit_save(&self, callback: &Callback, tenant: &str, content: Bytes) -> AppResult<u32> {
        self.commit(callback, tenant, Some(content)).await
    }

    /// Replaces the live content without touching history.
    pub async fn replace_content(&self, filename: &str, tenant: &str, content: Bytes) -> AppResult<()> {
        validate_filename(filename)?;
        let path = self.storage.file_path(filename, tenant).await?;
        let _guard = self.locks.acquire(tenant, filename).await;
        self.storage.create_file(&path, content).await
    }

    async fn commit(&self, callback: &Callback, tenant: &str, content: Option<Bytes>) -> AppResult<u32> {
        let filename = callback.filename.as_str();
        validate_filename(filename)?;

        let root = self.storage.root_folder(tenant).await?;
        let live_content = self.storage.file_path(filename, tenant).await?;
        let live_meta = layout::live_meta_path(&root, filename);

        if !self.storage.path_exists(&live_meta).await {
            return Err(AppError::not_found(format!("file {filename} no longer exists")));
        }
        let changes_url = callback
            .changesurl
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::validation("Callback carries no changes url"))?;
        if callback.history.changes.is_empty() {
            return Err(AppError::validation("Callback carries an empty change log"));
        }

        let _guard = self.locks.acquire(tenant, filename).await;

        // Nothing is written until the diff is in hand.
        let diff = self.fetcher.fetch(changes_url).await?;

        let version = self.claim_slot(&root, filename).await?;
        let roll = Roll {
            slot: layout::slot_dir(&root, filename, version),
            live_meta,
            live_content,
        };

        let mut progress = RollProgress::default();
        if let Err(err) = self
            .roll(&roll, filename, callback, diff, content, &mut progress)
            .await
        {
            error!(
                filename = %filename,
                tenant = %tenant,
                version,
                error = %err,
                "Commit failed, rolling back"
            );
            self.rollback(&roll, filename, &progress).await;
            return Err(err);
        }

        info!(
            filename = %filename,
            tenant = %tenant,
            version,
            key = %callback.key,
            "Version committed"
        );
        Ok(version)
    }

    /// Finds the first free slot and creates it exclusively.
    async fn claim_slot(&self, root: &Path, filename: &str) -> AppResult<u32> {
        for attempt in 0..=self.commit_retries {
            let mut version = 1;
            while self
                .storage
                .path_exists(&layout::slot_dir(root, filename, version))
                .await
            {
                version += 1;
            }

            match self
                .storage
                .create_dir_new(&layout::slot_dir(root, filename, version))
                .await
            {
                Ok(()) => return Ok(version),
                Err(e) if e.kind == ErrorKind::Conflict => {
                    warn!(filename = %filename, version, attempt, "Version slot taken, rescanning");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(format!(
            "Could not claim a version slot for {filename} after {} attempts",
            self.commit_retries + 1
        )))
    }

    async fn roll(
        &self,
        roll: &Roll,
        filename: &str,
        callback: &Callback,
        diff: Bytes,
        content: Option<Bytes>,
        progress: &mut RollProgress,
    ) -> AppResult<()> {
        self.storage
            .move_file(&roll.live_meta, &roll.slot.join(layout::CHANGES_FILE))
            .await?;
        progress.meta_moved = true;

        self.storage
            .create_file(
                &roll.live_meta,
                Bytes::from(serde_json::to_vec(&callback.history.changes)?),
            )
            .await?;

        self.storage
            .create_file(
                &roll.slot.join(layout::KEY_FILE),
                Bytes::from(callback.key.clone()),
            )
            .await?;

        self.storage
            .move_file(
                &roll.live_content,
                &roll.slot.join(layout::prev_file_name(filename)),
            )
            .await?;
        progress.content_moved = true;

        self.storage
            .create_file(&roll.slot.join(layout::DIFF_FILE), diff)
            .await?;

        if let Some(content) = content {
            self.storage.create_file(&roll.live_content, content).await?;
        }
        Ok(())
    }

    /// Puts moved live files back and drops the slot. Failures are logged so
    /// the original error reaches the caller.
    async fn rollback(&self, roll: &Roll, filename: &str, progress: &RollProgress) {
        if progress.content_moved {
            let prev = roll.slot.join(layout::prev_file_name(filename));
            if let Err(e) = self.storage.move_file(&prev, &roll.live_content).await {
                error!(path = %roll.live_content.display(), error = %e, "Failed to restore live content");
            }
        }
        if progress.meta_moved {
            let changes = roll.slot.join(layout::CHANGES_FILE);
            if let Err(e) = self.storage.move_file(&changes, &roll.live_meta).await {
                error!(path = %roll.live_meta.display(), error = %e, "Failed to restore live metadata");
            }
        }
        if let Err(e) = self.storage.remove_dir(&roll.slot).await {
            error!(path = %roll.slot.display(), error = %e, "Failed to remove version slot");
        }
    }
}
