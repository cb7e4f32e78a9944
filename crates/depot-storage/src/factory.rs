use crate::{BlobStore, DualWriteCoordinator, LocalSink, LocalStorage, StorageResult};
use depot_core::Config;
use std::sync::Arc;

/// Build the local sink, ensuring its root directory exists
pub async fn create_local_storage(config: &Config) -> StorageResult<Arc<dyn LocalSink>> {
    let storage = LocalStorage::new(config.local.upload_dir.clone()).await?;
    Ok(Arc::new(storage))
}

/// Build the object store client
#[cfg(feature = "storage-s3")]
pub async fn create_blob_store(config: &Config) -> StorageResult<Arc<dyn BlobStore>> {
    let store = &config.object_store;
    let blob = crate::S3BlobStore::new(
        &store.endpoint_url(),
        &store.region,
        &store.access_key,
        &store.secret_key,
        store.public_url.clone(),
    )
    .await?;
    Ok(Arc::new(blob))
}

#[cfg(not(feature = "storage-s3"))]
pub async fn create_blob_store(_config: &Config) -> StorageResult<Arc<dyn BlobStore>> {
    Err(crate::StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

/// Assemble a coordinator over the given backends using the configured bucket,
/// prefix and timeout
pub fn coordinator_with(
    config: &Config,
    local: Arc<dyn LocalSink>,
    blob: Arc<dyn BlobStore>,
) -> DualWriteCoordinator {
    DualWriteCoordinator::new(
        local,
        blob,
        config.object_store.bucket.clone(),
        config.object_store.region.clone(),
        config.local.public_prefix.clone(),
        config.object_store.timeout(),
    )
}

/// Create the dual-write coordinator based on configuration
pub async fn create_coordinator(config: &Config) -> StorageResult<DualWriteCoordinator> {
    let local = create_local_storage(config).await?;
    let blob = create_blob_store(config).await?;
    Ok(coordinator_with(config, local, blob))
}
