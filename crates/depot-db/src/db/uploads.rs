//! Upload repository: CRUD for the uploads table.

use chrono::{DateTime, Utc};
use depot_core::models::{NewUpload, Upload};
use depot_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Record Store operations the service layer relies on
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    async fn create(&self, upload: NewUpload) -> Result<Upload, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, AppError>;

    /// Returns `false` when no record had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Every record, in no particular order.
    async fn list_all(&self) -> Result<Vec<Upload>, AppError>;
}

/// Row type for the uploads table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct UploadRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub local_path: String,
    pub remote_path: Option<String>,
    pub canonical_path: String,
    pub created_at: DateTime<Utc>,
}

impl UploadRow {
    pub fn to_upload(self) -> Upload {
        Upload {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            language: self.language,
            provider: self.provider,
            roles: self.roles,
            local_path: self.local_path,
            remote_path: self.remote_path,
            canonical_path: self.canonical_path,
            created_at: self.created_at,
        }
    }
}

const UPLOAD_COLUMNS: &str = "id, title, description, category, language, provider, roles, \
     local_path, remote_path, canonical_path, created_at";

/// Repository for the uploads table.
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UploadStore for UploadRepository {
    #[tracing::instrument(skip(self, upload), fields(db.table = "uploads"))]
    async fn create(&self, upload: NewUpload) -> Result<Upload, AppError> {
        let id = Uuid::new_v4();
        let query = format!(
            r#"
            INSERT INTO uploads (
                id, title, description, category, language, provider, roles,
                local_path, remote_path, canonical_path
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            UPLOAD_COLUMNS
        );

        let row: UploadRow = sqlx::query_as::<Postgres, UploadRow>(&query)
            .bind(id)
            .bind(&upload.title)
            .bind(&upload.description)
            .bind(&upload.category)
            .bind(&upload.language)
            .bind(&upload.provider)
            .bind(&upload.roles)
            .bind(&upload.local_path)
            .bind(&upload.remote_path)
            .bind(&upload.canonical_path)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(upload_id = %row.id, "Upload record created");
        Ok(row.to_upload())
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, AppError> {
        let query = format!("SELECT {} FROM uploads WHERE id = $1", UPLOAD_COLUMNS);
        let row: Option<UploadRow> = sqlx::query_as::<Postgres, UploadRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.to_upload()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM uploads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads"))]
    async fn list_all(&self) -> Result<Vec<Upload>, AppError> {
        let query = format!("SELECT {} FROM uploads", UPLOAD_COLUMNS);
        let rows: Vec<UploadRow> = sqlx::query_as::<Postgres, UploadRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.to_upload()).collect())
    }
}
