use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;

/// Region S3 treats as the default; bucket creation there must omit a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-compatible object store client (MinIO by default)
#[derive(Clone, Debug)]
pub struct S3BlobStore {
    client: Client,
    public_url: String,
}

impl S3BlobStore {
    /// Create a new S3BlobStore instance
    ///
    /// # Arguments
    /// * `endpoint_url` - API endpoint, e.g. "http://minio:9000"
    /// * `region` - region the client signs requests for
    /// * `access_key` / `secret_key` - static credentials
    /// * `public_url` - base of the public object URLs handed back to callers
    ///   (e.g. "http://localhost:9000" when the API endpoint is only reachable inside a
    ///   container network)
    pub async fn new(
        endpoint_url: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        public_url: String,
    ) -> StorageResult<Self> {
        if endpoint_url.trim().is_empty() {
            return Err(StorageError::ConfigError(
                "Object store endpoint is empty".to_string(),
            ));
        }

        let credentials = Credentials::new(access_key, secret_key, None, None, "depot-static");

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .load()
            .await;

        // Path-style addressing is required for MinIO
        let s3_config = S3ConfigBuilder::from(&sdk_config)
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build();

        tracing::debug!(endpoint = %endpoint_url, region = %region, "S3 client configured");

        Ok(S3BlobStore {
            client: Client::from_conf(s3_config),
            public_url,
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_not_found() || service_err.raw().status().as_u16() == 404 =>
            {
                Ok(false)
            }
            Err(e) => Err(StorageError::BucketError(format!(
                "Failed to check bucket {}: {}",
                bucket,
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn make_bucket(&self, bucket: &str, region: &str) -> StorageResult<()> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if region != DEFAULT_REGION {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        match request.send().await {
            Ok(_) => {
                tracing::info!(bucket = %bucket, region = %region, "S3 bucket created");
                Ok(())
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_bucket_already_owned_by_you() =>
            {
                Ok(())
            }
            Err(e) => Err(StorageError::BucketError(format!(
                "Failed to create bucket {}: {}",
                bucket,
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        let size = data.len();
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(size as i64)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    bucket = %bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::WriteFailed(DisplayErrorContext(&e).to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(DisplayErrorContext(&e).to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_url.trim_end_matches('/'), bucket, key)
    }
}
