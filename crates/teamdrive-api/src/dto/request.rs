//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use teamdrive_core::error::AppError;

/// Body of `POST /api/files/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder id; the team root when absent or blank.
    #[serde(default)]
    pub parent_folder: Option<String>,
}

/// Body of `PATCH /api/files`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// File id.
    #[validate(length(min = 1, message = "File id is required"))]
    pub id: String,
    /// New name without the extension.
    #[validate(length(max = 255))]
    pub name: String,
}

/// Run `validator` rules, mapping failures to a validation error.
pub fn validate<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
