//! Storage manager: the active gateway plus bucket names and public URLs.

use std::sync::Arc;

use tracing::info;

use teamdrive_core::config::{StorageConfig, StorageProviderKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::StorageGateway;

use crate::providers::LocalObjectStore;

/// Central handle on object storage shared by all requests.
#[derive(Debug, Clone)]
pub struct StorageManager {
    gateway: Arc<dyn StorageGateway>,
    document_bucket: String,
    image_bucket: String,
    public_base: String,
}

impl StorageManager {
    /// Wrap an existing gateway.
    pub fn new(gateway: Arc<dyn StorageGateway>, config: &StorageConfig) -> Self {
        Self {
            gateway,
            document_bucket: config.document_bucket.clone(),
            image_bucket: config.image_bucket.clone(),
            public_base: public_base(&config.endpoint),
        }
    }

    /// Build the gateway selected by `config.provider`.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        let gateway: Arc<dyn StorageGateway> = match config.provider {
            StorageProviderKind::Local => Arc::new(
                LocalObjectStore::new(&config.local.root_path, public_base(&config.endpoint))
                    .await?,
            ),
            #[cfg(feature = "s3")]
            StorageProviderKind::S3 => {
                Arc::new(crate::providers::S3ObjectStore::new(&config.s3).await?)
            }
            #[cfg(not(feature = "s3"))]
            StorageProviderKind::S3 => {
                return Err(teamdrive_core::AppError::configuration(
                    "S3 storage requested but the `s3` feature is not enabled",
                ));
            }
        };

        info!(
            provider = gateway.provider_type(),
            document_bucket = %config.document_bucket,
            image_bucket = %config.image_bucket,
            "Storage gateway ready"
        );
        Ok(Self::new(gateway, config))
    }

    /// The active gateway.
    pub fn gateway(&self) -> &Arc<dyn StorageGateway> {
        &self.gateway
    }

    /// Bucket for folder-tree documents.
    pub fn document_bucket(&self) -> &str {
        &self.document_bucket
    }

    /// Bucket for standalone images.
    pub fn image_bucket(&self) -> &str {
        &self.image_bucket
    }

    /// Deterministic, non-expiring URL of an object.
    pub fn object_url(&self, bucket: &str, object_name: &str) -> String {
        format!("{}/{bucket}/{object_name}", self.public_base)
    }

    /// Check the gateway's health.
    pub async fn health_check(&self) -> bool {
        self.gateway.health_check().await.unwrap_or(false)
    }
}

/// `https://<endpoint>` unless the endpoint already names a scheme.
fn public_base(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}
