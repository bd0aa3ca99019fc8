//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::{DocumentStorage, RemoteFetcher};
use dochub_storage::LocalDocumentStorage;

/// Tenant address used by every test.
pub const TENANT: &str = "127.0.0.1";
/// Shared secret for signing tests.
pub const SECRET: &str = "integration-secret";

/// Editing server stand-in: serves registered bodies by URL.
#[derive(Debug, Default)]
pub struct MockEditingServer {
    bodies: Mutex<HashMap<String, Bytes>>,
}

impl MockEditingServer {
    /// Registers the body served at `url`.
    pub fn serve(&self, url: &str, body: &'static [u8]) {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), Bytes::from_static(body));
    }
}

#[async_trait]
impl RemoteFetcher for MockEditingServer {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.bodies
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::network(format!("connection refused: {url}")))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Storage the router writes to
    pub storage: Arc<LocalDocumentStorage>,
    /// Editing server stand-in
    pub editing_server: Arc<MockEditingServer>,
    /// Application config
    pub config: AppConfig,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application with signing disabled
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application with signing enabled
    pub async fn signed() -> Self {
        Self::with_config(|config| {
            config.document_server.jwt_enabled = true;
            config.document_server.jwt_secret = SECRET.to_string();
        })
        .await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.root_path = dir.path().to_string_lossy().to_string();
        config.storage.public_url = "http://docs.test".to_string();
        adjust(&mut config);

        let storage = Arc::new(
            LocalDocumentStorage::new(&config.storage)
                .await
                .expect("Failed to init storage"),
        );
        let editing_server = Arc::new(MockEditingServer::default());

        let state = dochub_api::AppState::new(
            config.clone(),
            storage.clone(),
            editing_server.clone(),
        );
        let router = dochub_api::build_router(state);

        Self {
            router,
            storage,
            editing_server,
            config,
            _dir: dir,
        }
    }

    /// Root folder of the test tenant
    pub async fn root(&self) -> PathBuf {
        self.storage
            .root_folder(TENANT)
            .await
            .expect("Failed to resolve tenant root")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `content` as `filename` and return the stored name
    pub async fn upload(&self, filename: &str, content: &[u8]) -> String {
        let boundary = "dochub-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"uploadedFile\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(format!(
                "/api/upload?userAddress={TENANT}&userId=uid-1&userName=John%20Smith"
            ))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self.send(req).await;
        assert_eq!(response.status, StatusCode::OK, "Upload failed: {:?}", response.body);
        response
            .json()
            .get("filename")
            .and_then(|v| v.as_str())
            .expect("No filename in upload response")
            .to_string()
    }

    /// Post an editing server callback for `filename`
    pub async fn callback(
        &self,
        filename: &str,
        body: Value,
        token: Option<&str>,
    ) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/callback?filename={filename}&user_address={TENANT}"),
            Some(body),
            token,
        )
        .await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw body
    pub body: Bytes,
}

impl TestResponse {
    /// Parsed JSON body, `Null` when the body is not JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// A save callback as the editing server posts it
pub fn save_callback(status: u8, key: &str, user: &str) -> Value {
    serde_json::json!({
        "key": key,
        "status": status,
        "url": "http://ds.test/cache/output.docx",
        "changesurl": "http://ds.test/cache/changes.zip",
        "history": {
            "serverVersion": "8.0.0",
            "changes": [
                { "created": "2024-05-01 10:00:00", "user": { "id": user, "name": format!("{user} name") } }
            ]
        },
        "users": [user],
        "actions": [{ "type": 0, "userid": user }]
    })
}
