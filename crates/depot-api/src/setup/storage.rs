//! Storage setup and initialization

use anyhow::{Context, Result};
use depot_core::Config;
use depot_storage::DualWriteCoordinator;

/// Create the local root and the object store client, and wire them into the coordinator.
///
/// The bucket is not touched here; it is ensured lazily on the first upload so an
/// unreachable object store does not prevent startup.
pub async fn setup_storage(config: &Config) -> Result<DualWriteCoordinator> {
    let coordinator = depot_storage::create_coordinator(config)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(
        upload_dir = %config.local.upload_dir.display(),
        endpoint = %config.object_store.endpoint_url(),
        bucket = %config.object_store.bucket,
        remote_timeout_secs = config.object_store.timeout_secs,
        "Storage initialized"
    );

    Ok(coordinator)
}
