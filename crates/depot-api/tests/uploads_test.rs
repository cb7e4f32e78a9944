//! Upload API integration tests.
//!
//! Run with: `cargo test -p depot-api --test uploads_test`

mod helpers;

use depot_storage::memory::BlobOp;
use helpers::fixtures::{file_form, full_form};
use helpers::{api_path, setup_test_app, BUCKET, PUBLIC_URL};
use serde_json::Value;
use uuid::Uuid;

/// Key of a canonical path: its last segment.
fn key_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_upload_writes_both_backends() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Upload successful");

    let upload = &body["upload"];
    let local_path = upload["localPath"].as_str().unwrap();
    let remote_path = upload["remotePath"].as_str().unwrap();
    let key = key_of(local_path);

    assert!(key.ends_with("-a.txt"));
    assert_eq!(local_path, format!("/uploads/{}", key));
    assert_eq!(remote_path, format!("{}/{}/{}", PUBLIC_URL, BUCKET, key));
    assert_eq!(upload["canonicalPath"], remote_path);

    assert_eq!(std::fs::read(app.local_file(key)).unwrap(), b"hello");
    assert_eq!(app.blob.get_object(BUCKET, key).unwrap().as_ref(), b"hello");
    assert_eq!(app.blob.content_type_of(BUCKET, key).as_deref(), Some("text/plain"));
    assert_eq!(app.records.len(), 1);
}

#[tokio::test]
async fn test_upload_alias_route() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(file_form("b.pdf", b"%PDF-1.4", "application/pdf"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.records.len(), 1);
}

#[tokio::test]
async fn test_upload_stores_metadata() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(full_form("report.txt", b"q3"))
        .await;

    assert_eq!(response.status_code(), 200);
    let upload = &response.json::<Value>()["upload"];
    assert_eq!(upload["title"], "Quarterly report");
    assert_eq!(upload["description"], "Numbers for Q3");
    assert_eq!(upload["category"], "finance");
    assert_eq!(upload["language"], "en");
    assert_eq!(upload["provider"], "internal");
    assert_eq!(upload["roles"], serde_json::json!(["admin", "editor", "viewer"]));
}

#[tokio::test]
async fn test_upload_degrades_when_object_store_fails() {
    let app = setup_test_app().await;
    app.blob.fail_on(BlobOp::PutObject);

    let response = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await;

    assert_eq!(response.status_code(), 200);
    let upload = &response.json::<Value>()["upload"];
    assert!(upload["remotePath"].is_null());
    assert_eq!(upload["canonicalPath"], upload["localPath"]);

    let key = key_of(upload["localPath"].as_str().unwrap());
    assert_eq!(std::fs::read(app.local_file(key)).unwrap(), b"hello");
    assert_eq!(app.blob.object_count(), 0);
}

#[tokio::test]
async fn test_upload_degrades_when_bucket_unavailable() {
    let app = setup_test_app().await;
    app.blob.fail_on(BlobOp::MakeBucket);

    let response = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.json::<Value>()["upload"]["remotePath"].is_null());
    assert_eq!(app.blob.calls_of(BlobOp::PutObject), 0);
}

#[tokio::test]
async fn test_upload_without_file_is_rejected_without_writes() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("title", "no file");
    let response = app.client().post(&api_path("/uploads")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(app.local_file_count(), 0);
    assert!(app.blob.calls().is_empty());
    assert!(app.records.is_empty());
}

#[tokio::test]
async fn test_list_returns_every_upload() {
    let app = setup_test_app().await;

    for name in ["a.txt", "b.txt", "c.txt"] {
        let response = app
            .client()
            .post(&api_path("/uploads"))
            .multipart(file_form(name, name.as_bytes(), "text/plain"))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    let response = app.client().get(&api_path("/uploads")).await;
    assert_eq!(response.status_code(), 200);

    let uploads: Vec<Value> = response.json();
    assert_eq!(uploads.len(), 3);
    let mut ids: Vec<&str> = uploads.iter().map(|u| u["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_get_returns_canonical_url() {
    let app = setup_test_app().await;

    let created: Value = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await
        .json();
    let id = created["upload"]["id"].as_str().unwrap();

    let response = app.client().get(&api_path(&format!("/uploads/{}", id))).await;

    assert_eq!(response.status_code(), 200);
    let url = response.json::<Value>()["url"].as_str().unwrap().to_string();
    assert_eq!(url, created["upload"]["canonicalPath"].as_str().unwrap());
    assert_eq!(app.blob.get_object(BUCKET, key_of(&url)).unwrap().as_ref(), b"hello");
}

#[tokio::test]
async fn test_local_canonical_path_is_served() {
    let app = setup_test_app().await;
    app.blob.fail_on(BlobOp::PutObject);

    let created: Value = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await
        .json();
    let local_path = created["upload"]["canonicalPath"].as_str().unwrap();

    let response = app.client().get(local_path).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), b"hello");
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id_is_404() {
    let app = setup_test_app().await;

    let unknown = app
        .client()
        .get(&api_path(&format!("/uploads/{}", Uuid::new_v4())))
        .await;
    assert_eq!(unknown.status_code(), 404);
    assert!(unknown.json::<Value>()["error"].is_string());

    let malformed = app.client().get(&api_path("/uploads/not-a-uuid")).await;
    assert_eq!(malformed.status_code(), 404);
}

#[tokio::test]
async fn test_delete_remote_file_orphans_local_copy() {
    let app = setup_test_app().await;

    let created: Value = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await
        .json();
    let id = created["upload"]["id"].as_str().unwrap();
    let key = key_of(created["upload"]["localPath"].as_str().unwrap()).to_string();

    let response = app
        .client()
        .delete(&api_path(&format!("/uploads/{}", id)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "File deleted");
    assert!(app.records.is_empty());
    assert!(app.blob.get_object(BUCKET, &key).is_none());
    // Only the remote copy is targeted
    assert!(app.local_file(&key).exists());
}

#[tokio::test]
async fn test_delete_local_file_never_calls_object_store() {
    let app = setup_test_app().await;
    app.blob.fail_on(BlobOp::PutObject);

    let created: Value = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await
        .json();
    let id = created["upload"]["id"].as_str().unwrap();
    let key = key_of(created["upload"]["localPath"].as_str().unwrap()).to_string();
    app.blob.clear_failures();

    let response = app
        .client()
        .delete(&api_path(&format!("/uploads/{}", id)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "File deleted");
    assert!(!app.local_file(&key).exists());
    assert_eq!(app.blob.calls_of(BlobOp::RemoveObject), 0);
    assert!(app.records.is_empty());
}

#[tokio::test]
async fn test_delete_keeps_record_when_nothing_was_removed() {
    let app = setup_test_app().await;

    let created: Value = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await
        .json();
    let id = created["upload"]["id"].as_str().unwrap();
    app.blob.fail_on(BlobOp::RemoveObject);

    let response = app
        .client()
        .delete(&api_path(&format!("/uploads/{}", id)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>()["message"],
        "No stored copy could be removed; record retained"
    );
    assert_eq!(app.records.len(), 1);
    assert_eq!(app.records.delete_count(), 0);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .delete(&api_path(&format!("/uploads/{}", Uuid::new_v4())))
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(app.blob.calls().is_empty());
}

#[tokio::test]
async fn test_record_failure_discards_stored_copies() {
    let app = setup_test_app().await;
    app.records.fail_creates();

    let response = app
        .client()
        .post(&api_path("/uploads"))
        .multipart(file_form("a.txt", b"hello", "text/plain"))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<Value>()["error"], "Failed to access database");
    assert_eq!(app.local_file_count(), 0);
    assert_eq!(app.blob.object_count(), 0);
}
