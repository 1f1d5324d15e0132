//! # teamdrive-service
//!
//! Business logic for the per-team virtual filesystem. The
//! [`FolderService`] composes the folder directory, file registry, user
//! lookup and storage gateway into the public folder and file operations.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod folder;

pub use context::RequestContext;
pub use folder::{CreateFileInput, FolderService, UploadImageInput};
