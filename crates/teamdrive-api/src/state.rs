//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use teamdrive_core::config::AppConfig;
use teamdrive_service::FolderService;
use teamdrive_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Object storage
    pub storage: Arc<StorageManager>,
    /// Folder tree operations
    pub folder_service: Arc<FolderService>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        storage: Arc<StorageManager>,
        folder_service: Arc<FolderService>,
    ) -> Self {
        Self {
            config,
            storage,
            folder_service,
        }
    }
}
