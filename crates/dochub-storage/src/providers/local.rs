//! Local filesystem document storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bytes::Bytes;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use dochub_core::config::StorageConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::traits::storage::{DocumentStorage, FileMeta};
use dochub_core::types::{file_stem, validate_filename};

/// Length of generated document keys.
const DOCUMENT_KEY_LEN: usize = 20;

/// Local filesystem storage with one folder per tenant address.
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    /// Directory holding all tenant folders.
    root: PathBuf,
    /// Base URL the editing server reaches this host on.
    public_url: String,
}

impl LocalDocumentStorage {
    /// Create a storage rooted at the configured path.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_url: config.public_url.trim_end_matches('/').to_string(),
        })
    }

    /// Folder name for a tenant address, unique per trimmed address.
    fn tenant_dir_name(tenant: &str) -> Option<String> {
        let tenant = tenant.trim();
        if tenant.is_empty() {
            return None;
        }
        Some(URL_SAFE_NO_PAD.encode(tenant.as_bytes()))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn root_folder(&self, tenant: &str) -> AppResult<PathBuf> {
        let name = Self::tenant_dir_name(tenant)
            .ok_or_else(|| AppError::not_found(format!("No root folder for address '{tenant}'")))?;
        let folder = self.root.join(name);
        fs::create_dir_all(&folder).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create root folder: {}", folder.display()),
                e,
            )
        })?;
        Ok(folder)
    }

    async fn file_path(&self, filename: &str, tenant: &str) -> AppResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root_folder(tenant).await?.join(filename))
    }

    async fn read_file(&self, path: &Path) -> AppResult<Bytes> {
        let data = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {}", path.display()))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {}", path.display()),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn create_file(&self, path: &Path, data: Bytes) -> AppResult<()> {
        self.ensure_parent(path).await?;
        fs::write(path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {}", path.display()),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn create_dir(&self, path: &Path) -> AppResult<()> {
        fs::create_dir_all(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {}", path.display()),
                e,
            )
        })
    }

    async fn create_dir_new(&self, path: &Path) -> AppResult<()> {
        self.ensure_parent(path).await?;
        fs::create_dir(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                AppError::conflict(format!("Directory already exists: {}", path.display()))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", path.display()),
                    e,
                )
            }
        })
    }

    async fn move_file(&self, from: &Path, to: &Path) -> AppResult<()> {
        self.ensure_parent(to).await?;
        fs::rename(from, to).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {}", from.display()))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to move {} -> {}", from.display(), to.display()),
                    e,
                )
            }
        })?;

        debug!(from = %from.display(), to = %to.display(), "Moved file");
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> AppResult<()> {
        if self.path_exists(path).await {
            fs::remove_file(path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {}", path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn remove_dir(&self, path: &Path) -> AppResult<()> {
        if self.path_exists(path).await {
            fs::remove_dir_all(path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete directory: {}", path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn path_exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn generate_file_hash(&self, filename: &str, tenant: &str) -> AppResult<String> {
        let path = self.file_path(filename, tenant).await?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {filename}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to get metadata: {filename}"),
                    e,
                )
            }
        })?;

        let modified = meta
            .modified()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339())
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(modified.as_bytes());
        hasher.update(meta.len().to_le_bytes());
        let mut key = URL_SAFE_NO_PAD.encode(hasher.finalize());
        key.truncate(DOCUMENT_KEY_LEN);
        Ok(key)
    }

    fn generate_public_file_uri(&self, filename: &str, tenant: &str, meta: &FileMeta) -> String {
        if meta.is_live() {
            format!(
                "{}/api/download?fileName={}&userAddress={}",
                self.public_url,
                encode(filename),
                encode(tenant)
            )
        } else {
            format!(
                "{}/api/history/download?fileName={}&file={}&ver={}&userAddress={}",
                self.public_url,
                encode(filename),
                encode(&meta.destination_path),
                meta.version,
                encode(tenant)
            )
        }
    }

    async fn versioned_filename(&self, filename: &str, tenant: &str) -> AppResult<String> {
        validate_filename(filename)?;
        let root = self.root_folder(tenant).await?;
        let stem = file_stem(filename);
        let ext = &filename[stem.len()..];

        let mut candidate = filename.to_string();
        let mut index = 1u32;
        while self.path_exists(&root.join(&candidate)).await {
            candidate = format!("{stem} ({index}){ext}");
            index += 1;
        }
        Ok(candidate)
    }
}
