//! Public projections returned by the folder service.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use teamdrive_core::types::{FileId, FolderId};
use teamdrive_entity::file::File;
use teamdrive_entity::folder::{Folder, FolderPathEntry, FolderType};

/// Public view of a folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderView {
    pub id: FolderId,
    pub name: String,
    #[serde(rename = "type")]
    pub folder_type: FolderType,
    pub path: Vec<FolderPathEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
}

impl From<&Folder> for FolderView {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            folder_type: folder.folder_type,
            path: folder.path.clone(),
            parent_folder_id: folder.parent_folder,
            created_at: folder.created_at,
            last_modified_time: folder.last_modified_time,
        }
    }
}

/// Public view of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub id: FileId,
    pub folder_id: FolderId,
    pub owner_name: String,
    pub name: String,
    /// Storage object name.
    pub file_path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub path: Vec<String>,
    pub size: i64,
    pub extension: String,
    pub created_at: DateTime<Utc>,
}

impl From<&File> for FileView {
    fn from(file: &File) -> Self {
        Self {
            id: file.id,
            folder_id: file.folder_id,
            owner_name: file.owner_name.clone(),
            name: file.name.clone(),
            file_path: file.file_path.clone(),
            url: file.url.clone(),
            file_type: file.file_type.clone(),
            path: file.path.clone(),
            size: file.size,
            extension: file.extension.clone(),
            created_at: file.created_at,
        }
    }
}

/// A folder with its immediate child folders and files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListing {
    pub folder_info: FolderView,
    pub folders: Vec<FolderView>,
    pub files: Vec<FileView>,
}

impl FolderListing {
    pub(crate) fn project(folder: &Folder, folders: &[Folder], files: &[File]) -> Self {
        Self {
            folder_info: FolderView::from(folder),
            folders: folders.iter().map(FolderView::from).collect(),
            files: files.iter().map(FileView::from).collect(),
        }
    }
}

/// Result of a rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedFile {
    pub id: FileId,
    /// Full display name including the extension.
    pub name: String,
}

/// A standalone image stored outside the folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUpload {
    pub url: String,
    /// Object key the caller must keep to delete the image later.
    pub path: String,
}

/// File metadata with the raw object bytes.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub file: FileView,
    pub data: Bytes,
}
