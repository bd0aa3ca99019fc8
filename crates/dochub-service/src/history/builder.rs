//! Reconstruction of a document's version history for the editing client.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::traits::{DocumentStorage, FileMeta, TokenSigner};
use dochub_core::types::validate_filename;
use dochub_entity::history::{Change, History, HistoryPrevious, HistoryRefresh, HistorySet};

use super::layout;

/// Walks committed version slots and the live metadata of a document.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    /// Document storage.
    storage: Arc<dyn DocumentStorage>,
    /// Signs every history set when token signing is enabled.
    signer: Option<Arc<dyn TokenSigner>>,
}

impl HistoryBuilder {
    /// Creates a new history builder. Pass `None` to leave sets unsigned.
    pub fn new(storage: Arc<dyn DocumentStorage>, signer: Option<Arc<dyn TokenSigner>>) -> Self {
        Self { storage, signer }
    }

    /// Builds the full history of `filename`: one entry per committed
    /// version plus the current, uncommitted one.
    ///
    /// The returned sets are index-aligned with `HistoryRefresh::history`.
    /// Any read, decode or signing failure fails the whole call.
    pub async fn get_history(
        &self,
        filename: &str,
        tenant: &str,
    ) -> AppResult<(HistoryRefresh, Vec<HistorySet>)> {
        validate_filename(filename)?;
        let root = self.storage.root_folder(tenant).await?;
        let prev_name = layout::prev_file_name(filename);

        let mut history = Vec::new();
        let mut sets = Vec::new();
        let mut previous: Option<HistoryPrevious> = None;
        let mut version: u32 = 1;

        loop {
            let slot = layout::slot_dir(&root, filename, version);
            if !self.storage.path_exists(&slot).await {
                break;
            }

            let changes = self
                .read_changes(&slot.join(layout::CHANGES_FILE), version)
                .await?;
            let key = self.read_key(&slot.join(layout::KEY_FILE), version).await?;
            let url = self.storage.generate_public_file_uri(
                filename,
                tenant,
                &FileMeta::artifact(version, prev_name.as_str()),
            );
            let changes_url = self.storage.generate_public_file_uri(
                filename,
                tenant,
                &FileMeta::artifact(version, layout::DIFF_FILE),
            );

            history.push(history_entry(changes, key.clone(), version)?);
            sets.push(HistorySet {
                changes_url: Some(changes_url),
                key: key.clone(),
                url: url.clone(),
                version,
                previous: previous.take(),
                token: None,
            });

            previous = Some(HistoryPrevious { key, url });
            version += 1;
        }

        let live_changes = self
            .read_changes(&layout::live_meta_path(&root, filename), version)
            .await?;
        let key = self.storage.generate_file_hash(filename, tenant).await?;
        let url = self
            .storage
            .generate_public_file_uri(filename, tenant, &FileMeta::default());

        history.push(history_entry(live_changes, key.clone(), version)?);
        sets.push(HistorySet {
            changes_url: None,
            key,
            url,
            version,
            previous: None,
            token: None,
        });

        if let Some(signer) = &self.signer {
            for set in &mut sets {
                let payload = serde_json::to_value(&*set)?;
                set.token = Some(signer.sign(&payload)?);
            }
        }

        info!(
            filename = %filename,
            tenant = %tenant,
            current_version = version,
            signed = self.signer.is_some(),
            "History built"
        );

        Ok((
            HistoryRefresh {
                current_version: version.to_string(),
                history,
            },
            sets,
        ))
    }

    async fn read_changes(&self, path: &Path, version: u32) -> AppResult<Vec<Change>> {
        let raw = self.storage.read_file(path).await?;
        serde_json::from_slice(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Malformed change log for version {version}"),
                e,
            )
        })
    }

    async fn read_key(&self, path: &Path, version: u32) -> AppResult<String> {
        let raw = self.storage.read_file(path).await?;
        let key = String::from_utf8(raw.to_vec()).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Key of version {version} is not valid UTF-8"),
                e,
            )
        })?;
        debug!(version, "Read version key");
        Ok(key.trim_end().to_string())
    }
}

/// Entry attributed to the last change of the version's log.
fn history_entry(changes: Vec<Change>, key: String, version: u32) -> AppResult<History> {
    let last = changes
        .last()
        .cloned()
        .ok_or_else(|| AppError::validation(format!("Version {version} has an empty change log")))?;

    Ok(History {
        created: last.created,
        user: last.user,
        changes,
        key,
        version,
    })
}
