//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against a temporary upload directory, an in-memory object store and an
//! in-memory record store, so no Docker services are needed.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use depot_api::constants;
use depot_api::setup::routes;
use depot_api::{AppState, UploadService};
use depot_core::Config;
use depot_db::MemoryUploadStore;
use depot_storage::memory::MemoryBlobStore;
use depot_storage::{coordinator_with, LocalStorage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const BUCKET: &str = "uploads";
pub const PUBLIC_URL: &str = "http://localhost:9000";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on every backend.
pub struct TestApp {
    pub server: TestServer,
    pub blob: MemoryBlobStore,
    pub records: MemoryUploadStore,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Path on disk of a locally stored key
    pub fn local_file(&self, key: &str) -> PathBuf {
        self.upload_dir.join(key)
    }

    pub fn local_file_count(&self) -> usize {
        count_files(&self.upload_dir)
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

pub fn test_config(upload_dir: PathBuf) -> Config {
    let mut config = Config::default();
    config.local.upload_dir = upload_dir;
    config.object_store.bucket = BUCKET.to_string();
    config.object_store.public_url = PUBLIC_URL.to_string();
    config.object_store.timeout_secs = 2;
    config
}

/// Setup test app with a temp upload dir and in-memory object and record stores.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let upload_dir = temp_dir.path().join("static/uploads");
    let config = test_config(upload_dir.clone());

    let local = LocalStorage::new(upload_dir.clone())
        .await
        .expect("Failed to create local storage");
    let blob = MemoryBlobStore::new(PUBLIC_URL);
    let records = MemoryUploadStore::new();

    let coordinator = coordinator_with(&config, Arc::new(local), Arc::new(blob.clone()));
    assert_eq!(config.object_store.timeout(), Duration::from_secs(2));

    let uploads = UploadService::new(coordinator, Arc::new(records.clone()));
    let state = Arc::new(AppState::new(config.clone(), uploads));

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        blob,
        records,
        upload_dir,
        _temp_dir: temp_dir,
    }
}
