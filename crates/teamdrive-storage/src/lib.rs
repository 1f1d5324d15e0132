//! # teamdrive-storage
//!
//! Storage gateway implementations for TeamDrive: a local filesystem
//! gateway and an S3-compatible gateway (feature `s3`), plus the
//! [`StorageManager`] that pairs the active gateway with bucket names and
//! the public URL builder.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
