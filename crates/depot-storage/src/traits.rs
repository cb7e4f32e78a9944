//! Storage abstraction traits
//!
//! `LocalSink` and `BlobStore` are the two leaf collaborators the coordinator writes
//! through. Both must be safe for concurrent use.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Unusable caller input, such as an empty original file name
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bucket error: {0}")]
    BucketError(String),

    #[error("Remote operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Local filesystem sink, keyed by generated file name relative to a fixed root.
#[async_trait]
pub trait LocalSink: Send + Sync {
    /// Write `data` under `key`, replacing any existing file.
    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Remove the file under `key`. Returns `false` when there was nothing to remove.
    async fn remove(&self, key: &str) -> StorageResult<bool>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// S3-compatible object store client.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool>;

    async fn make_bucket(&self, bucket: &str, region: &str) -> StorageResult<()>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Public URL of an object: `{public_url}/{bucket}/{key}`
    fn object_url(&self, bucket: &str, key: &str) -> String;
}
