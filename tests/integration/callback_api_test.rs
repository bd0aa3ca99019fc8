//! Integration tests for the editing server callback endpoint.

mod helpers;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

use helpers::{SECRET, TENANT, TestApp, save_callback};

fn serve_save(app: &TestApp) {
    app.editing_server
        .serve("http://ds.test/cache/output.docx", b"edited content");
    app.editing_server
        .serve("http://ds.test/cache/changes.zip", b"PK-diff");
}

fn sign(claims: &serde_json::Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_editing_status_acknowledged() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;

    let response = app
        .callback(&filename, json!({ "key": "k", "status": 1, "users": ["uid-1"] }), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 0 }));
}

#[tokio::test]
async fn test_save_commits_version() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    serve_save(&app);

    let response = app
        .callback(&filename, save_callback(2, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 0 }));

    let root = app.root().await;
    let slot = root.join("sample.docx.history").join("1");
    assert_eq!(std::fs::read(root.join("sample.docx")).unwrap(), b"edited content");
    assert_eq!(std::fs::read(slot.join("prev.docx")).unwrap(), b"original content");
    assert_eq!(std::fs::read(slot.join("diff.zip")).unwrap(), b"PK-diff");
    assert_eq!(std::fs::read(slot.join("key.txt")).unwrap(), b"session-key-1");

    let live: serde_json::Value = serde_json::from_slice(
        &std::fs::read(root.join("sample.docx.history").join("sample.docx.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(live[0]["user"]["id"], "uid-2");
}

#[tokio::test]
async fn test_force_save_keeps_history() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    serve_save(&app);

    let response = app
        .callback(&filename, save_callback(6, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 0 }));

    let root = app.root().await;
    assert_eq!(std::fs::read(root.join("sample.docx")).unwrap(), b"edited content");
    assert!(!root.join("sample.docx.history").join("1").exists());
}

#[tokio::test]
async fn test_failed_diff_download_changes_nothing() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    app.editing_server
        .serve("http://ds.test/cache/output.docx", b"edited content");

    let response = app
        .callback(&filename, save_callback(2, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 1 }));

    let root = app.root().await;
    assert!(!root.join("sample.docx.history").join("1").exists());
    assert_eq!(std::fs::read(root.join("sample.docx")).unwrap(), b"original content");
}

#[tokio::test]
async fn test_deleted_document_reports_error() {
    let app = TestApp::new().await;
    serve_save(&app);

    let response = app
        .callback("gone.docx", save_callback(2, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 1 }));
}

#[tokio::test]
async fn test_callback_without_target_rejected() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    let body = json!({ "key": "k", "status": 1, "users": ["uid-1"] });

    for path in [
        format!("/api/callback?filename=&user_address={TENANT}"),
        format!("/api/callback?filename={filename}&user_address="),
        format!("/api/callback?filename={filename}"),
    ] {
        let response = app.request("POST", &path, Some(body.clone()), None).await;
        assert_eq!(response.json(), json!({ "error": 1 }), "{path}");
    }
}

#[tokio::test]
async fn test_malformed_and_unknown_status_rejected() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;

    let response = app.callback(&filename, json!("not an object"), None).await;
    assert_eq!(response.json(), json!({ "error": 1 }));

    let response = app
        .callback(&filename, json!({ "key": "k", "status": 5 }), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 1 }));
}

#[tokio::test]
async fn test_unsigned_callback_rejected_when_signing_enabled() {
    let app = TestApp::signed().await;
    let filename = app.upload("sample.docx", b"original content").await;
    serve_save(&app);

    let response = app
        .callback(&filename, save_callback(2, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 1 }));

    let root = app.root().await;
    assert_eq!(std::fs::read(root.join("sample.docx")).unwrap(), b"original content");
}

#[tokio::test]
async fn test_header_token_replaces_body() {
    let app = TestApp::signed().await;
    let filename = app.upload("sample.docx", b"original content").await;
    serve_save(&app);

    let token = sign(&json!({ "payload": save_callback(2, "signed-key", "uid-2") }));
    let response = app
        .callback(&filename, json!({ "key": "forged", "status": 1 }), Some(&token))
        .await;
    assert_eq!(response.json(), json!({ "error": 0 }));

    let root = app.root().await;
    let slot = root.join("sample.docx.history").join("1");
    assert_eq!(std::fs::read(slot.join("key.txt")).unwrap(), b"signed-key");
}

#[tokio::test]
async fn test_body_token_accepted() {
    let app = TestApp::signed().await;
    let filename = app.upload("sample.docx", b"original content").await;
    serve_save(&app);

    let token = sign(&save_callback(6, "signed-key", "uid-2"));
    let response = app
        .callback(&filename, json!({ "status": 1, "token": token }), None)
        .await;
    assert_eq!(response.json(), json!({ "error": 0 }));

    let root = app.root().await;
    assert_eq!(std::fs::read(root.join("sample.docx")).unwrap(), b"edited content");
}
