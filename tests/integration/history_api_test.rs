//! Integration tests for version history endpoints.

mod helpers;

use http::StatusCode;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use helpers::{SECRET, TENANT, TestApp, save_callback};

async fn commit_one_version(app: &TestApp, filename: &str) {
    app.editing_server
        .serve("http://ds.test/cache/output.docx", b"edited content");
    app.editing_server
        .serve("http://ds.test/cache/changes.zip", b"PK-diff");

    let response = app
        .callback(filename, save_callback(2, "session-key-1", "uid-2"), None)
        .await;
    assert_eq!(response.json(), serde_json::json!({ "error": 0 }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_history_of_fresh_upload() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    assert_eq!(filename, "sample.docx");

    let response = app
        .request(
            "GET",
            &format!("/api/history?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["refHist"]["currentVersion"], "1");
    assert_eq!(body["refHist"]["history"].as_array().unwrap().len(), 1);
    assert_eq!(body["refHist"]["history"][0]["user"]["id"], "uid-1");
    assert_eq!(body["setHist"].as_array().unwrap().len(), 1);
    assert!(body["setHist"][0].get("changesUrl").is_none());
    assert!(body["setHist"][0].get("token").is_none());
    assert!(
        body["setHist"][0]["url"]
            .as_str()
            .unwrap()
            .starts_with("http://docs.test/api/download?")
    );
}

#[tokio::test]
async fn test_history_after_save() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    commit_one_version(&app, &filename).await;

    let body = app
        .request(
            "GET",
            &format!("/api/history?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await
        .json();

    assert_eq!(body["refHist"]["currentVersion"], "2");
    let history = body["refHist"]["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["version"], 1);
    assert_eq!(history[0]["key"], "session-key-1");
    assert_eq!(history[0]["user"]["id"], "uid-1");
    assert_eq!(history[1]["version"], 2);
    assert_eq!(history[1]["user"]["id"], "uid-2");

    let sets = body["setHist"].as_array().unwrap();
    assert!(sets[0]["changesUrl"].as_str().unwrap().contains("ver=1"));
    assert!(sets[1].get("previous").is_none());
    assert_eq!(sets[0]["key"], "session-key-1");
}

#[tokio::test]
async fn test_previous_links_chain_versions() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    commit_one_version(&app, &filename).await;
    app.callback(&filename, save_callback(2, "session-key-2", "uid-3"), None)
        .await;

    let body = app
        .request(
            "GET",
            &format!("/api/history?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await
        .json();

    assert_eq!(body["refHist"]["currentVersion"], "3");
    let sets = body["setHist"].as_array().unwrap();
    assert_eq!(sets[1]["previous"]["key"], sets[0]["key"]);
    assert_eq!(sets[1]["previous"]["url"], sets[0]["url"]);
    assert_eq!(sets[1]["key"], "session-key-2");
}

#[tokio::test]
async fn test_download_artifacts() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    commit_one_version(&app, &filename).await;

    let prev = app
        .request(
            "GET",
            &format!("/api/history/download?fileName={filename}&file=prev.docx&ver=1&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(prev.status, StatusCode::OK);
    assert_eq!(&prev.body[..], b"original content");

    let diff = app
        .request(
            "GET",
            &format!("/api/history/download?fileName={filename}&file=diff.zip&ver=1&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(diff.status, StatusCode::OK);
    assert_eq!(&diff.body[..], b"PK-diff");

    let live = app
        .request(
            "GET",
            &format!("/api/download?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(&live.body[..], b"edited content");
}

#[tokio::test]
async fn test_artifact_traversal_rejected() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    commit_one_version(&app, &filename).await;

    let response = app
        .request(
            "GET",
            &format!("/api/history/download?fileName={filename}&file=..%2F..%2Fsample.docx&ver=1&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_document_yields_empty_history() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/history?fileName=missing.docx&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert!(body["refHist"]["history"].as_array().unwrap().is_empty());
    assert!(body["setHist"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_signed_history_sets() {
    let app = TestApp::signed().await;
    let filename = app.upload("sample.docx", b"original content").await;

    let body = app
        .request(
            "GET",
            &format!("/api/history?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await
        .json();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    for set in body["setHist"].as_array().unwrap() {
        let token = set["token"].as_str().expect("set is unsigned");
        let claims = decode::<serde_json::Value>(
            token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .expect("token does not verify")
        .claims;
        assert_eq!(claims["key"], set["key"]);
        assert_eq!(claims["url"], set["url"]);
    }
}

#[tokio::test]
async fn test_delete_removes_document_and_history() {
    let app = TestApp::new().await;
    let filename = app.upload("sample.docx", b"original content").await;
    commit_one_version(&app, &filename).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.json(), serde_json::json!({ "error": 0 }));

    let root = app.root().await;
    assert!(!root.join("sample.docx").exists());
    assert!(!root.join("sample.docx.history").exists());

    let response = app
        .request(
            "GET",
            &format!("/api/download?fileName={filename}&userAddress={TENANT}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_upload_gets_versioned_name() {
    let app = TestApp::new().await;
    assert_eq!(app.upload("sample.docx", b"one").await, "sample.docx");
    assert_eq!(app.upload("sample.docx", b"two").await, "sample (1).docx");
}
