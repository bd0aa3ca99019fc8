//! Fixtures shared by the service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use dochub_core::config::StorageConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::{DocumentStorage, FileMeta, RemoteFetcher};
use dochub_entity::{Change, EditorUser};
use dochub_storage::LocalDocumentStorage;

use crate::history::layout;

pub const TENANT: &str = "127.0.0.1";
pub const PUBLIC_URL: &str = "http://docs.local";

/// Serves canned bodies by URL and records every request.
#[derive(Debug, Default)]
pub struct StubFetcher {
    bodies: Mutex<HashMap<String, Bytes>>,
    pub requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with(self, url: &str, body: &'static [u8]) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), Bytes::from_static(body));
        self
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::network(format!("connection refused: {url}")))
    }
}

/// Local storage whose `create_file` fails for paths ending in one name.
#[derive(Debug)]
pub struct FailingStorage {
    inner: Arc<LocalDocumentStorage>,
    fail_on: &'static str,
}

impl FailingStorage {
    pub fn new(inner: Arc<LocalDocumentStorage>, fail_on: &'static str) -> Self {
        Self { inner, fail_on }
    }
}

#[async_trait]
impl DocumentStorage for FailingStorage {
    async fn root_folder(&self, tenant: &str) -> AppResult<PathBuf> {
        self.inner.root_folder(tenant).await
    }

    async fn file_path(&self, filename: &str, tenant: &str) -> AppResult<PathBuf> {
        self.inner.file_path(filename, tenant).await
    }

    async fn read_file(&self, path: &Path) -> AppResult<Bytes> {
        self.inner.read_file(path).await
    }

    async fn create_file(&self, path: &Path, data: Bytes) -> AppResult<()> {
        if path.ends_with(self.fail_on) {
            return Err(AppError::storage(format!("disk full: {}", path.display())));
        }
        self.inner.create_file(path, data).await
    }

    async fn create_dir(&self, path: &Path) -> AppResult<()> {
        self.inner.create_dir(path).await
    }

    async fn create_dir_new(&self, path: &Path) -> AppResult<()> {
        self.inner.create_dir_new(path).await
    }

    async fn move_file(&self, from: &Path, to: &Path) -> AppResult<()> {
        self.inner.move_file(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> AppResult<()> {
        self.inner.remove_file(path).await
    }

    async fn remove_dir(&self, path: &Path) -> AppResult<()> {
        self.inner.remove_dir(path).await
    }

    async fn path_exists(&self, path: &Path) -> bool {
        self.inner.path_exists(path).await
    }

    async fn generate_file_hash(&self, filename: &str, tenant: &str) -> AppResult<String> {
        self.inner.generate_file_hash(filename, tenant).await
    }

    fn generate_public_file_uri(&self, filename: &str, tenant: &str, meta: &FileMeta) -> String {
        self.inner.generate_public_file_uri(filename, tenant, meta)
    }

    async fn versioned_filename(&self, filename: &str, tenant: &str) -> AppResult<String> {
        self.inner.versioned_filename(filename, tenant).await
    }
}

pub async fn storage(dir: &tempfile::TempDir) -> Arc<LocalDocumentStorage> {
    let storage = LocalDocumentStorage::new(&StorageConfig {
        root_path: dir.path().to_string_lossy().to_string(),
        public_url: PUBLIC_URL.to_string(),
    })
    .await
    .unwrap();
    Arc::new(storage)
}

pub fn change(created: &str, user: &str) -> Change {
    Change {
        created: created.to_string(),
        user: EditorUser::new(user, format!("{user} name")),
    }
}

/// Writes live content and live metadata for a freshly uploaded document.
pub async fn seed(
    storage: &LocalDocumentStorage,
    filename: &str,
    content: &'static [u8],
    changes: &[Change],
) -> PathBuf {
    let root = storage.root_folder(TENANT).await.unwrap();
    storage
        .create_file(&root.join(filename), Bytes::from_static(content))
        .await
        .unwrap();
    storage
        .create_file(
            &layout::live_meta_path(&root, filename),
            Bytes::from(serde_json::to_vec(changes).unwrap()),
        )
        .await
        .unwrap();
    root
}

pub fn read_changes(path: &Path) -> Vec<Change> {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}
