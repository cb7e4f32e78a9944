//! Upload lifecycle: dual-write store plus record persistence, lookup and
//! conditional removal.

use crate::error::store_error;
use bytes::Bytes;
use depot_core::models::{DeleteOutcome, NewUpload, Upload, UploadMetadata};
use depot_core::AppError;
use depot_db::UploadStore;
use depot_storage::DualWriteCoordinator;
use std::sync::Arc;
use uuid::Uuid;

/// Parsed multipart upload
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
    pub metadata: UploadMetadata,
}

/// What a removal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalReport {
    pub outcome: DeleteOutcome,
    pub record_deleted: bool,
}

#[derive(Clone)]
pub struct UploadService {
    coordinator: DualWriteCoordinator,
    repository: Arc<dyn UploadStore>,
}

/// Ids that do not parse cannot name a record.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("File not found".to_string()))
}

impl UploadService {
    pub fn new(coordinator: DualWriteCoordinator, repository: Arc<dyn UploadStore>) -> Self {
        Self {
            coordinator,
            repository,
        }
    }

    /// Store the file in both backends, then persist its record.
    #[tracing::instrument(skip(self, form), fields(file_name = %form.file_name, size_bytes = form.data.len()))]
    pub async fn create(&self, form: UploadForm) -> Result<Upload, AppError> {
        let report = self
            .coordinator
            .store(form.data, &form.file_name, form.content_type.as_deref())
            .await
            .map_err(store_error)?;

        let new_upload = NewUpload::from_stored(form.metadata, &report.stored);
        match self.repository.create(new_upload).await {
            Ok(upload) => {
                tracing::info!(
                    upload_id = %upload.id,
                    canonical_path = %upload.canonical_path,
                    "Upload recorded"
                );
                Ok(upload)
            }
            Err(e) => {
                tracing::error!(error = %e, key = %report.stored.generated_name, "Failed to record upload, discarding stored copies");
                self.coordinator.discard(&report.stored).await;
                Err(e)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Upload>, AppError> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Upload, AppError> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Path the file should be fetched from
    pub async fn access_path(&self, id: &str) -> Result<String, AppError> {
        let upload = self.get(id).await?;
        Ok(upload.access_path().to_string())
    }

    /// Delete the stored copy the record points at; the record goes only if that worked.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<RemovalReport, AppError> {
        let upload = self.get(id).await?;

        let outcome = self.coordinator.delete(&upload.canonical_path).await;

        let record_deleted = if outcome.any_succeeded() {
            self.repository.delete(upload.id).await?
        } else {
            tracing::warn!(
                upload_id = %upload.id,
                canonical_path = %upload.canonical_path,
                "No stored copy removed, record retained"
            );
            false
        };

        Ok(RemovalReport {
            outcome,
            record_deleted,
        })
    }
}
