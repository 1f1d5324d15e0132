//! Storage gateway implementations.

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::ByteStream;

/// Reject bucket and object names that could escape their namespace.
pub(crate) fn validate_key(kind: &str, key: &str) -> AppResult<()> {
    if key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.chars().any(char::is_control)
    {
        return Err(AppError::validation(format!("Invalid {kind} name: '{key}'")));
    }
    Ok(())
}

/// Drain an upload into one contiguous buffer, checking it holds exactly
/// `size_bytes`.
///
/// Used by gateways whose client needs the whole body up front. Peak
/// memory per upload is the full object size.
#[cfg_attr(not(feature = "s3"), allow(dead_code))]
pub(crate) async fn collect_exact(mut data: ByteStream, size_bytes: u64) -> AppResult<Bytes> {
    let capacity = usize::try_from(size_bytes)
        .map_err(|_| AppError::validation(format!("Upload of {size_bytes} bytes is too large")))?;
    let mut buffer = BytesMut::with_capacity(capacity);
    while let Some(chunk) = data.next().await {
        let chunk =
            chunk.map_err(|e| AppError::with_source(ErrorKind::Storage, "Stream read error", e))?;
        if (buffer.len() + chunk.len()) as u64 > size_bytes {
            return Err(AppError::storage(format!(
                "Upload exceeded its declared size of {size_bytes} bytes"
            )));
        }
        buffer.extend_from_slice(&chunk);
    }
    if buffer.len() as u64 != size_bytes {
        return Err(AppError::storage(format!(
            "Upload received {} bytes, expected {size_bytes}",
            buffer.len()
        )));
    }
    Ok(buffer.freeze())
}
