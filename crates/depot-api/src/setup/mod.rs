//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::uploads::UploadService;
use crate::state::AppState;
use anyhow::{Context, Result};
use depot_core::Config;
use depot_db::UploadRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.base.environment,
        bucket = %config.object_store.bucket,
        upload_dir = %config.local.upload_dir.display(),
        "Configuration loaded and validated successfully"
    );

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let coordinator = storage::setup_storage(&config).await?;

    let uploads = UploadService::new(coordinator, Arc::new(UploadRepository::new(pool)));
    let state = Arc::new(AppState::new(config.clone(), uploads));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
