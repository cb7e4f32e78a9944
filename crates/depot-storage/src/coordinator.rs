//! Dual-write storage coordinator
//!
//! A store writes the local copy first and fails if that write fails. The remote copy
//! is attempted afterwards under a bounded timeout; any remote failure degrades the
//! result to local-only instead of failing the call.
//!
//! Deletion dispatches on the shape of the canonical path and touches exactly one
//! backend. A file stored in both places has a remote canonical path, so only its
//! remote copy is removed and the local copy is left behind.

use crate::keys;
use crate::traits::{BlobStore, LocalSink, StorageError, StorageResult};
use bytes::Bytes;
use depot_core::models::{DeleteOutcome, RemoteWrite, StoredFile, StoredLocation};
use depot_core::{mime_type, DEFAULT_CONTENT_TYPE};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Result of a store call: the descriptor plus how the remote attempt went
#[derive(Debug, Clone)]
pub struct StoreReport {
    pub stored: StoredFile,
    pub remote: RemoteWrite,
}

#[derive(Clone)]
pub struct DualWriteCoordinator {
    local: Arc<dyn LocalSink>,
    blob: Arc<dyn BlobStore>,
    bucket: String,
    region: String,
    local_prefix: String,
    remote_timeout: Duration,
}

/// Pick the content type: the extension wins, then a non-empty hint, then the default.
fn resolve_content_type(generated_name: &str, hint: Option<&str>) -> String {
    let inferred = mime_type(generated_name);
    if inferred != DEFAULT_CONTENT_TYPE {
        return inferred.to_string();
    }
    match hint.map(str::trim) {
        Some(hint) if !hint.is_empty() => hint.to_string(),
        _ => DEFAULT_CONTENT_TYPE.to_string(),
    }
}

impl DualWriteCoordinator {
    pub fn new(
        local: Arc<dyn LocalSink>,
        blob: Arc<dyn BlobStore>,
        bucket: impl Into<String>,
        region: impl Into<String>,
        local_prefix: impl Into<String>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            local,
            blob,
            bucket: bucket.into(),
            region: region.into(),
            local_prefix: local_prefix.into(),
            remote_timeout,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store `data` under a generated name in both backends.
    ///
    /// Fails only on unusable input or when the local write fails.
    pub async fn store(
        &self,
        data: Bytes,
        original_name: &str,
        content_type_hint: Option<&str>,
    ) -> StorageResult<StoreReport> {
        let generated_name = keys::generate_file_name(original_name)?;
        let content_type = resolve_content_type(&generated_name, content_type_hint);

        self.local.write(&generated_name, &data).await?;
        let local_path = keys::local_path(&self.local_prefix, &generated_name);

        let remote = self
            .write_remote(&generated_name, data, &content_type)
            .await;

        let stored = StoredFile::new(
            generated_name,
            local_path,
            remote.url().map(str::to_string),
            content_type,
        );

        tracing::info!(
            key = %stored.generated_name,
            canonical_path = %stored.canonical_path,
            remote_degraded = remote.is_degraded(),
            "File stored"
        );

        Ok(StoreReport { stored, remote })
    }

    /// Delete the copy `canonical_path` points at.
    ///
    /// Never fails: per-backend failures are logged and reported as `false`.
    pub async fn delete(&self, canonical_path: &str) -> DeleteOutcome {
        let location = StoredLocation::from_canonical_path(canonical_path);
        let mut outcome = DeleteOutcome::default();

        match &location {
            StoredLocation::Remote { key } => {
                outcome.deleted_remotely = self.delete_remote(key).await;
            }
            StoredLocation::Local { key } => {
                outcome.deleted_locally = self.delete_local(key).await;
            }
        }

        if !outcome.any_succeeded() {
            tracing::warn!(
                canonical_path = %canonical_path,
                backend = %location.backend(),
                "Neither deletion succeeded"
            );
        }

        outcome
    }

    /// Preferred access path of a stored file; no I/O.
    pub fn fetch_access_path<'a>(&self, stored: &'a StoredFile) -> &'a str {
        stored.access_path()
    }

    /// Remove every copy of a freshly stored file whose record could not be persisted.
    pub async fn discard(&self, stored: &StoredFile) -> DeleteOutcome {
        let deleted_locally = self.delete_local(&stored.generated_name).await;
        let deleted_remotely = if stored.is_remote() {
            self.delete_remote(&stored.generated_name).await
        } else {
            false
        };

        tracing::info!(
            key = %stored.generated_name,
            deleted_locally,
            deleted_remotely,
            "Discarded stored file"
        );

        DeleteOutcome {
            deleted_locally,
            deleted_remotely,
        }
    }

    async fn with_timeout<T>(
        &self,
        attempt: impl Future<Output = StorageResult<T>>,
    ) -> StorageResult<T> {
        tokio::time::timeout(self.remote_timeout, attempt)
            .await
            .map_err(|_| StorageError::Timeout(self.remote_timeout))?
    }

    async fn ensure_bucket(&self) -> StorageResult<()> {
        if !self.blob.bucket_exists(&self.bucket).await? {
            tracing::info!(bucket = %self.bucket, region = %self.region, "Creating missing bucket");
            self.blob.make_bucket(&self.bucket, &self.region).await?;
        }
        Ok(())
    }

    async fn write_remote(&self, key: &str, data: Bytes, content_type: &str) -> RemoteWrite {
        let attempt = async {
            self.ensure_bucket().await?;
            self.blob
                .put_object(&self.bucket, key, data, content_type)
                .await?;
            Ok::<_, StorageError>(self.blob.object_url(&self.bucket, key))
        };

        match self.with_timeout(attempt).await {
            Ok(url) => RemoteWrite::Stored { url },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "Remote write skipped, keeping local copy only"
                );
                RemoteWrite::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn delete_local(&self, key: &str) -> bool {
        match self.local.remove(key).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Local delete failed");
                false
            }
        }
    }

    async fn delete_remote(&self, key: &str) -> bool {
        let attempt = self.blob.remove_object(&self.bucket, key);
        match self.with_timeout(attempt).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "Remote delete failed"
                );
                false
            }
        }
    }
}
