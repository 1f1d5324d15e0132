//! Storage gateway trait for pluggable object store backends.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for uploading object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Wrap an in-memory buffer as a single-chunk [`ByteStream`].
pub fn bytes_stream(data: Bytes) -> ByteStream {
    Box::pin(futures::stream::once(async move { Ok(data) }))
}

/// Opaque binary object store keyed by bucket and object name.
///
/// Object names are generated by the caller and never derived from a
/// user-facing display name. The [`StorageGateway`] trait is defined here
/// in `teamdrive-core` and implemented in `teamdrive-storage`.
/// Implementations must be safe for concurrent use by many requests.
#[async_trait]
pub trait StorageGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write `data` into `bucket` under `object_name`, tagging the object
    /// with the user-facing `display_name`.
    ///
    /// `size_bytes` is the exact body length. Implementations may stream the
    /// body or buffer it whole.
    async fn upload_file(
        &self,
        bucket: &str,
        object_name: &str,
        display_name: &str,
        size_bytes: u64,
        data: ByteStream,
    ) -> AppResult<()>;

    /// Issue a time-limited read URL for an object.
    async fn get_file_presigned_url(
        &self,
        bucket: &str,
        object_name: &str,
        ttl: Duration,
    ) -> AppResult<String>;

    /// Read a whole object into memory.
    async fn get_file(&self, bucket: &str, object_name: &str) -> AppResult<Bytes>;

    /// Delete an object.
    async fn delete_file(&self, bucket: &str, object_name: &str) -> AppResult<()>;
}
