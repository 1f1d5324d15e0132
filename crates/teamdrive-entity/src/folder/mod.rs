//! Folder domain entities.

pub mod model;

pub use model::{Folder, FolderPathEntry, FolderType, ROOT_FOLDER_NAME};
