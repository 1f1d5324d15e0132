//! Local filesystem storage gateway.
//!
//! Each bucket is a directory under the root. Next to every object sits a
//! `<object>.meta.json` sidecar recording the display name and size.
//!
//! This gateway is for development and tests. Its "presigned" URLs are the
//! public object URL with an `expires` timestamp appended. Nothing signs or
//! checks them, so they grant no more access than the permanent URL and
//! are not access control.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::{ByteStream, StorageGateway};

use super::validate_key;

const SIDECAR_SUFFIX: &str = ".meta.json";
const PARTIAL_SUFFIX: &str = ".part";

/// Metadata stored beside each object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// User-facing name the object was uploaded under.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    pub content_type: String,
}

/// Local filesystem storage gateway.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Directory holding one subdirectory per bucket.
    root: PathBuf,
    /// Base of issued URLs, e.g. `https://files.example.com`.
    public_base: String,
}

impl LocalObjectStore {
    /// Create a new gateway rooted at `root_path`.
    pub async fn new(root_path: &str, public_base: impl Into<String>) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn object_path(&self, bucket: &str, object_name: &str) -> AppResult<PathBuf> {
        validate_key("bucket", bucket)?;
        validate_key("object", object_name)?;
        Ok(self.root.join(bucket).join(object_name))
    }

    fn sidecar_path(object: &Path) -> PathBuf {
        let mut name = object.as_os_str().to_owned();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    fn partial_path(object: &Path) -> PathBuf {
        let mut name = object.as_os_str().to_owned();
        name.push(PARTIAL_SUFFIX);
        PathBuf::from(name)
    }

    /// Read the sidecar of an object.
    pub async fn metadata(&self, bucket: &str, object_name: &str) -> AppResult<ObjectMetadata> {
        let path = Self::sidecar_path(&self.object_path(bucket, object_name)?);
        let raw = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {bucket}/{object_name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read metadata: {bucket}/{object_name}"),
                    e,
                )
            }
        })?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn write_stream(&self, target: &Path, data: ByteStream) -> AppResult<u64> {
        let mut file = fs::File::create(target).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create file: {}", target.display()),
                e,
            )
        })?;

        let mut reader = StreamReader::new(data);
        let written = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to write object", e))?;

        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush object", e))?;
        Ok(written)
    }
}

#[async_trait]
impl StorageGateway for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn upload_file(
        &self,
        bucket: &str,
        object_name: &str,
        display_name: &str,
        size_bytes: u64,
        data: ByteStream,
    ) -> AppResult<()> {
        let target = self.object_path(bucket, object_name)?;
        let bucket_dir = self.root.join(bucket);
        fs::create_dir_all(&bucket_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create bucket: {bucket}"),
                e,
            )
        })?;

        let partial = Self::partial_path(&target);
        let written = match self.write_stream(&partial, data).await {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        if written != size_bytes {
            let _ = fs::remove_file(&partial).await;
            return Err(AppError::storage(format!(
                "Upload of {bucket}/{object_name} received {written} bytes, expected {size_bytes}"
            )));
        }

        let metadata = ObjectMetadata {
            name: display_name.to_string(),
            size_bytes: written,
            content_type: "application/octet-stream".to_string(),
        };
        fs::write(Self::sidecar_path(&target), serde_json::to_vec(&metadata)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to write object metadata", e)
            })?;
        fs::rename(&partial, &target).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to commit object: {bucket}/{object_name}"),
                e,
            )
        })?;

        debug!(bucket, object_name, bytes = written, "Stored object");
        Ok(())
    }

    /// Unsigned: the public URL plus an advisory `expires` timestamp.
    async fn get_file_presigned_url(
        &self,
        bucket: &str,
        object_name: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        let path = self.object_path(bucket, object_name)?;
        if fs::metadata(&path).await.is_err() {
            return Err(AppError::not_found(format!(
                "Object not found: {bucket}/{object_name}"
            )));
        }

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::validation(format!("Invalid presign ttl: {e}")))?;
        let expires = (Utc::now() + ttl).timestamp();
        Ok(format!(
            "{}/{bucket}/{object_name}?expires={expires}",
            self.public_base
        ))
    }

    async fn get_file(&self, bucket: &str, object_name: &str) -> AppResult<Bytes> {
        let path = self.object_path(bucket, object_name)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {bucket}/{object_name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read object: {bucket}/{object_name}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete_file(&self, bucket: &str, object_name: &str) -> AppResult<()> {
        let path = self.object_path(bucket, object_name)?;
        for target in [Self::sidecar_path(&path), path] {
            match fs::remove_file(&target).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(bucket, object_name, "Object already absent");
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to delete object: {bucket}/{object_name}"),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }
}
