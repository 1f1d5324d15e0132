//! Per-call deadlines for collaborator calls, in seconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deadlines applied by the folder service around every metadata-store
/// and storage-gateway call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Folder/file inserts, renames and child listings.
    #[serde(default = "default_metadata_write")]
    pub metadata_write_seconds: u64,
    /// Single-record lookups.
    #[serde(default = "default_metadata_read")]
    pub metadata_read_seconds: u64,
    /// Record deletion.
    #[serde(default = "default_metadata_delete")]
    pub metadata_delete_seconds: u64,
    /// Presigned URL issuance.
    #[serde(default = "default_presign")]
    pub presign_seconds: u64,
    /// Object upload and download.
    #[serde(default = "default_transfer")]
    pub transfer_seconds: u64,
    /// Object deletion.
    #[serde(default = "default_object_delete")]
    pub object_delete_seconds: u64,
}

impl TimeoutConfig {
    pub fn metadata_write(&self) -> Duration {
        Duration::from_secs(self.metadata_write_seconds)
    }

    pub fn metadata_read(&self) -> Duration {
        Duration::from_secs(self.metadata_read_seconds)
    }

    pub fn metadata_delete(&self) -> Duration {
        Duration::from_secs(self.metadata_delete_seconds)
    }

    pub fn presign(&self) -> Duration {
        Duration::from_secs(self.presign_seconds)
    }

    pub fn transfer(&self) -> Duration {
        Duration::from_secs(self.transfer_seconds)
    }

    pub fn object_delete(&self) -> Duration {
        Duration::from_secs(self.object_delete_seconds)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            metadata_write_seconds: default_metadata_write(),
            metadata_read_seconds: default_metadata_read(),
            metadata_delete_seconds: default_metadata_delete(),
            presign_seconds: default_presign(),
            transfer_seconds: default_transfer(),
            object_delete_seconds: default_object_delete(),
        }
    }
}

fn default_metadata_write() -> u64 {
    5
}

fn default_metadata_read() -> u64 {
    10
}

fn default_metadata_delete() -> u64 {
    50
}

fn default_presign() -> u64 {
    10
}

fn default_transfer() -> u64 {
    70
}

fn default_object_delete() -> u64 {
    50
}
