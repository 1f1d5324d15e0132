//! Folder service: root bootstrap, folder creation and listings.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use teamdrive_core::config::TimeoutConfig;
use teamdrive_core::deadline::with_deadline;
use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FolderId, TeamId};
use teamdrive_database::contracts::{FileRegistry, FolderDirectory, UserDirectory};
use teamdrive_entity::folder::{Folder, FolderType};
use teamdrive_storage::StorageManager;

use super::path::extend_folder_path;
use super::view::{FolderListing, FolderView};
use crate::context::RequestContext;

/// Orchestrates the folder directory, file registry, user lookup and
/// storage gateway.
///
/// Every collaborator call runs under its own deadline from
/// [`TimeoutConfig`]. Nothing is retried.
#[derive(Clone)]
pub struct FolderService {
    pub(super) folders: Arc<dyn FolderDirectory>,
    pub(super) files: Arc<dyn FileRegistry>,
    pub(super) users: Arc<dyn UserDirectory>,
    pub(super) storage: Arc<StorageManager>,
    pub(super) timeouts: TimeoutConfig,
    pub(super) presign_ttl: Duration,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService")
            .field("timeouts", &self.timeouts)
            .field("presign_ttl", &self.presign_ttl)
            .finish()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderDirectory>,
        files: Arc<dyn FileRegistry>,
        users: Arc<dyn UserDirectory>,
        storage: Arc<StorageManager>,
        timeouts: TimeoutConfig,
        presign_ttl: Duration,
    ) -> Self {
        Self {
            folders,
            files,
            users,
            storage,
            timeouts,
            presign_ttl,
        }
    }

    /// Creates the root folder of a newly provisioned team.
    ///
    /// A second call for the same team fails with `Conflict`.
    pub async fn create_root_folder(&self, team_id: TeamId) -> AppResult<FolderView> {
        let root = Folder::new_root(FolderId::new(), team_id, Utc::now());

        with_deadline(
            self.timeouts.metadata_write(),
            "create_root_folder",
            self.folders.create_folder(team_id, &root),
        )
        .await?;

        info!(team_id = %team_id, folder_id = %root.id, "Root folder created");
        Ok(FolderView::from(&root))
    }

    /// Creates a folder under `parent_folder`, or under the team root when
    /// the parent is absent or blank.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_folder: Option<&str>,
    ) -> AppResult<FolderView> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("folder name can't be empty"));
        }

        let parent = self.resolve_folder(ctx.team_id, parent_folder).await?;
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            team_id: ctx.team_id,
            name: name.to_string(),
            folder_type: FolderType::Default,
            path: extend_folder_path(&parent),
            parent_folder: Some(parent.id),
            created_at: now,
            last_modified_time: now,
        };

        with_deadline(
            self.timeouts.metadata_write(),
            "create_folder",
            self.folders.create_folder(ctx.team_id, &folder),
        )
        .await?;

        info!(
            team_id = %ctx.team_id,
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = %parent.id,
            depth = folder.depth(),
            "Folder created"
        );
        Ok(FolderView::from(&folder))
    }

    /// The team root with its immediate child folders and files.
    pub async fn get_folder_root(&self, ctx: &RequestContext) -> AppResult<FolderListing> {
        let root = self.root_folder(ctx.team_id).await?;
        self.list_children(ctx.team_id, &root).await
    }

    /// A folder with its immediate child folders and files.
    pub async fn get_folder_content(
        &self,
        ctx: &RequestContext,
        folder_id: &str,
    ) -> AppResult<FolderListing> {
        let folder_id = FolderId::parse(folder_id)?;
        let folder = self.folder_by_id(ctx.team_id, folder_id).await?;
        self.list_children(ctx.team_id, &folder).await
    }

    /// Fetch child folders and child files concurrently.
    ///
    /// A failure in either fetch drops the other and is returned as is.
    async fn list_children(&self, team_id: TeamId, folder: &Folder) -> AppResult<FolderListing> {
        let limit = self.timeouts.metadata_read();
        let (folders, files) = tokio::try_join!(
            with_deadline(
                limit,
                "get_folder_content_by_id",
                self.folders.get_folder_content_by_id(team_id, folder.id),
            ),
            with_deadline(
                limit,
                "get_files_by_folder_id",
                self.files.get_files_by_folder_id(team_id, folder.id),
            )
        )?;

        Ok(FolderListing::project(folder, &folders, &files))
    }

    /// Resolve an optional folder id, falling back to the team root.
    pub(super) async fn resolve_folder(
        &self,
        team_id: TeamId,
        folder_id: Option<&str>,
    ) -> AppResult<Folder> {
        match folder_id.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => self.root_folder(team_id).await,
            Some(raw) => {
                let folder_id = FolderId::parse(raw)?;
                self.folder_by_id(team_id, folder_id).await
            }
        }
    }

    async fn root_folder(&self, team_id: TeamId) -> AppResult<Folder> {
        with_deadline(
            self.timeouts.metadata_read(),
            "get_folder_root",
            self.folders.get_folder_root(team_id),
        )
        .await
    }

    async fn folder_by_id(&self, team_id: TeamId, folder_id: FolderId) -> AppResult<Folder> {
        with_deadline(
            self.timeouts.metadata_read(),
            "get_folder_by_id",
            self.folders.get_folder_by_id(team_id, folder_id),
        )
        .await
    }
}
