//! In-memory storage doubles for testing
//!
//! `MemoryBlobStore` supports failure injection, artificial latency and call recording so
//! tests can assert on which backend operations were attempted.

use crate::traits::{BlobStore, LocalSink, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Blob store operation an injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobOp {
    BucketExists,
    MakeBucket,
    PutObject,
    RemoveObject,
}

/// A recorded blob store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobCall {
    pub op: BlobOp,
    pub bucket: String,
    pub key: Option<String>,
}

#[derive(Default)]
struct BlobState {
    buckets: HashSet<String>,
    objects: HashMap<(String, String), (Bytes, String)>,
    failures: HashSet<BlobOp>,
    latency: Option<Duration>,
    calls: Vec<BlobCall>,
}

/// In-memory S3 stand-in
#[derive(Clone)]
pub struct MemoryBlobStore {
    state: Arc<Mutex<BlobState>>,
    public_url: String,
}

impl MemoryBlobStore {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BlobState::default())),
            public_url: public_url.into(),
        }
    }

    fn state(&self) -> MutexGuard<'_, BlobState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every call of `op` fail until cleared
    pub fn fail_on(&self, op: BlobOp) {
        self.state().failures.insert(op);
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    pub fn create_bucket(&self, bucket: &str) {
        self.state().buckets.insert(bucket.to_string());
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.state().buckets.contains(bucket)
    }

    pub fn get_object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.state()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(data, _)| data.clone())
    }

    pub fn content_type_of(&self, bucket: &str, key: &str) -> Option<String> {
        self.state()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(_, content_type)| content_type.clone())
    }

    pub fn object_count(&self) -> usize {
        self.state().objects.len()
    }

    pub fn calls(&self) -> Vec<BlobCall> {
        self.state().calls.clone()
    }

    pub fn calls_of(&self, op: BlobOp) -> usize {
        self.state().calls.iter().filter(|c| c.op == op).count()
    }

    /// Record the call, apply latency, then report an injected failure if any.
    async fn enter(&self, op: BlobOp, bucket: &str, key: Option<&str>) -> StorageResult<()> {
        let (latency, failing) = {
            let mut state = self.state();
            state.calls.push(BlobCall {
                op,
                bucket: bucket.to_string(),
                key: key.map(str::to_string),
            });
            (state.latency, state.failures.contains(&op))
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if failing {
            return Err(match op {
                BlobOp::BucketExists | BlobOp::MakeBucket => {
                    StorageError::BucketError(format!("injected {:?} failure", op))
                }
                BlobOp::PutObject => StorageError::WriteFailed("injected put failure".to_string()),
                BlobOp::RemoveObject => {
                    StorageError::DeleteFailed("injected remove failure".to_string())
                }
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        self.enter(BlobOp::BucketExists, bucket, None).await?;
        Ok(self.has_bucket(bucket))
    }

    async fn make_bucket(&self, bucket: &str, _region: &str) -> StorageResult<()> {
        self.enter(BlobOp::MakeBucket, bucket, None).await?;
        self.create_bucket(bucket);
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        self.enter(BlobOp::PutObject, bucket, Some(key)).await?;
        let mut state = self.state();
        if !state.buckets.contains(bucket) {
            return Err(StorageError::BucketError(format!("no such bucket: {}", bucket)));
        }
        state.objects.insert(
            (bucket.to_string(), key.to_string()),
            (data, content_type.to_string()),
        );
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.enter(BlobOp::RemoveObject, bucket, Some(key)).await?;
        self.state()
            .objects
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_url.trim_end_matches('/'), bucket, key)
    }
}

/// A recorded local sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalCall {
    Write(String),
    Remove(String),
}

#[derive(Default)]
struct LocalState {
    files: HashMap<String, Vec<u8>>,
    fail_writes: bool,
    calls: Vec<LocalCall>,
}

/// In-memory local filesystem stand-in
#[derive(Clone, Default)]
pub struct MemoryLocalSink {
    state: Arc<Mutex<LocalState>>,
}

impl MemoryLocalSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every write fail, as a full or read-only disk would
    pub fn fail_writes(&self) {
        self.state().fail_writes = true;
    }

    pub fn get_file(&self, key: &str) -> Option<Vec<u8>> {
        self.state().files.get(key).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state().files.len()
    }

    pub fn calls(&self) -> Vec<LocalCall> {
        self.state().calls.clone()
    }

    pub fn remove_calls(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, LocalCall::Remove(_)))
            .count()
    }
}

#[async_trait]
impl LocalSink for MemoryLocalSink {
    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let mut state = self.state();
        state.calls.push(LocalCall::Write(key.to_string()));
        if state.fail_writes {
            return Err(StorageError::WriteFailed(format!(
                "No space left on device: {}",
                key
            )));
        }
        state.files.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut state = self.state();
        state.calls.push(LocalCall::Remove(key.to_string()));
        Ok(state.files.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.state().files.contains_key(key))
    }
}
