//! Object store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which storage gateway implementation is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Buckets are directories on the local filesystem.
    Local,
    /// S3-compatible object store (AWS, MinIO).
    S3,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage gateway implementation.
    #[serde(default = "default_provider")]
    pub provider: StorageProviderKind,
    /// Public host used to build non-presigned object URLs.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bucket holding folder-tree documents.
    #[serde(default = "default_document_bucket")]
    pub document_bucket: String,
    /// Bucket holding standalone images (avatars, banners).
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    /// Lifetime of presigned read URLs in seconds (default 24 h).
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_seconds: u64,
    /// Maximum upload size in bytes (default 2 GiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible object storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl StorageConfig {
    /// Presigned URL lifetime.
    pub fn presign_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_ttl_seconds)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            document_bucket: default_document_bucket(),
            image_bucket: default_image_bucket(),
            presign_ttl_seconds: default_presign_ttl(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory under which each bucket gets its own subdirectory.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}

fn default_provider() -> StorageProviderKind {
    StorageProviderKind::Local
}

fn default_endpoint() -> String {
    "localhost:8080/objects".to_string()
}

fn default_document_bucket() -> String {
    "documents".to_string()
}

fn default_image_bucket() -> String {
    "images".to_string()
}

fn default_presign_ttl() -> u64 {
    86_400
}

fn default_max_upload() -> u64 {
    2_147_483_648 // 2 GiB
}

fn default_local_root() -> String {
    "./data/objects".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
