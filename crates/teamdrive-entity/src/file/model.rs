//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamdrive_core::types::{FileId, FolderId, TeamId};

/// A file placed in a team folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// File identifier, assigned on insert.
    pub id: FileId,
    /// Owning team.
    pub team_id: TeamId,
    /// Folder containing this file.
    pub folder_id: FolderId,
    /// Display name of the uploader at upload time.
    pub owner_name: String,
    /// Display name, including the extension.
    pub name: String,
    /// Storage object name. Never changes after upload.
    pub file_path: String,
    /// Public, non-expiring URL of the stored object.
    pub url: String,
    /// `"<category>/<extension>"`, e.g. `"other/pdf"`.
    pub file_type: String,
    /// Ancestor folder names from the root, then the file's own name.
    pub path: Vec<String>,
    /// Size in bytes.
    pub size: i64,
    /// Lowercase extension without the leading dot.
    pub extension: String,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Display name for `base_name` keeping this file's extension.
    pub fn renamed(&self, base_name: &str) -> String {
        if self.extension.is_empty() {
            base_name.to_string()
        } else {
            format!("{base_name}.{}", self.extension)
        }
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    pub team_id: TeamId,
    pub folder_id: FolderId,
    pub owner_name: String,
    pub name: String,
    pub file_path: String,
    pub url: String,
    pub file_type: String,
    pub path: Vec<String>,
    pub size: i64,
    pub extension: String,
}
