//! S3-compatible object storage gateway (requires the `s3` feature).
//!
//! Uploads are not streamed to S3. The request body is collected into
//! memory first (see `collect_exact`) and sent as a single `PutObject`, so
//! an upload holds its whole object in memory. The HTTP body limit bounds
//! that size.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream as S3ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, info};

use teamdrive_core::config::S3StorageConfig;
use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::{ByteStream, StorageGateway};

use super::{collect_exact, validate_key};

/// S3-compatible storage gateway (AWS S3, MinIO).
#[derive(Debug)]
pub struct S3ObjectStore {
    client: Client,
    /// Buckets already confirmed or created by this process.
    known_buckets: Mutex<HashSet<String>>,
}

impl S3ObjectStore {
    /// Create a new S3 gateway from configuration.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            "Initializing S3 storage gateway"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "teamdrive",
            ));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(true);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            known_buckets: Mutex::new(HashSet::new()),
        })
    }

    /// Create `bucket` unless it already exists.
    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()> {
        let mut known = self.known_buckets.lock().await;
        if known.contains(bucket) {
            return Ok(());
        }

        if self.client.head_bucket().bucket(bucket).send().await.is_err() {
            match self.client.create_bucket().bucket(bucket).send().await {
                Ok(_) => info!(bucket, "Created bucket"),
                Err(e)
                    if e.as_service_error().is_some_and(|s| {
                        s.is_bucket_already_owned_by_you() || s.is_bucket_already_exists()
                    }) => {}
                Err(e) => {
                    return Err(AppError::storage(format!(
                        "Failed to create bucket {bucket}: {}",
                        DisplayErrorContext(&e)
                    )));
                }
            }
        }

        known.insert(bucket.to_string());
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.client.list_buckets().send().await.is_ok())
    }

    async fn upload_file(
        &self,
        bucket: &str,
        object_name: &str,
        display_name: &str,
        size_bytes: u64,
        data: ByteStream,
    ) -> AppResult<()> {
        validate_key("bucket", bucket)?;
        validate_key("object", object_name)?;
        self.ensure_bucket(bucket).await?;

        let body = collect_exact(data, size_bytes).await?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(object_name)
            .body(S3ByteStream::from(body))
            .content_length(size_bytes as i64)
            .content_type("application/octet-stream")
            .metadata("name", display_name)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to upload {bucket}/{object_name}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(bucket, object_name, bytes = size_bytes, "Stored object");
        Ok(())
    }

    async fn get_file_presigned_url(
        &self,
        bucket: &str,
        object_name: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        validate_key("object", object_name)?;
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid presign ttl", e))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(object_name)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to presign {bucket}/{object_name}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(request.uri().to_string())
    }

    async fn get_file(&self, bucket: &str, object_name: &str) -> AppResult<Bytes> {
        validate_key("object", object_name)?;
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(object_name)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|s| s.is_no_such_key()) {
                    AppError::not_found(format!("Object not found: {bucket}/{object_name}"))
                } else {
                    AppError::storage(format!(
                        "Failed to read {bucket}/{object_name}: {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read body of {bucket}/{object_name}"),
                e,
            )
        })?;
        Ok(data.into_bytes())
    }

    async fn delete_file(&self, bucket: &str, object_name: &str) -> AppResult<()> {
        validate_key("object", object_name)?;
        self.client
            .delete_object()
            .bucket(bucket)
            .key(object_name)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to delete {bucket}/{object_name}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
