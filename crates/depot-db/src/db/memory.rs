//! In-memory record store for testing

use chrono::Utc;
use depot_core::models::{NewUpload, Upload};
use depot_core::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::uploads::UploadStore;

#[derive(Default)]
struct State {
    records: HashMap<Uuid, Upload>,
    fail_creates: bool,
    deletes: usize,
}

/// `UploadStore` backed by a map
#[derive(Clone, Default)]
pub struct MemoryUploadStore {
    state: Arc<Mutex<State>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every create fail with a database error
    pub fn fail_creates(&self) {
        self.state().fail_creates = true;
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of delete calls that removed a record
    pub fn delete_count(&self) -> usize {
        self.state().deletes
    }

    pub fn get(&self, id: Uuid) -> Option<Upload> {
        self.state().records.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl UploadStore for MemoryUploadStore {
    async fn create(&self, upload: NewUpload) -> Result<Upload, AppError> {
        let mut state = self.state();
        if state.fail_creates {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let record = upload.into_upload(Uuid::new_v4(), Utc::now());
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, AppError> {
        Ok(self.get(id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state();
        let removed = state.records.remove(&id).is_some();
        if removed {
            state.deletes += 1;
        }
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<Upload>, AppError> {
        Ok(self.state().records.values().cloned().collect())
    }
}
