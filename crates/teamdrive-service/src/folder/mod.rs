//! Folder tree operations.

mod files;
mod images;
pub mod path;
pub mod service;
pub mod view;

pub use files::CreateFileInput;
pub use images::UploadImageInput;
pub use service::FolderService;
pub use view::{FileContent, FileView, FolderListing, FolderView, ImageUpload, RenamedFile};
