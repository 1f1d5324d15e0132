//! Persistence contracts consumed by the folder service.
//!
//! Every team-owned record is addressed by `(team_id, id)`. A record that
//! exists under another team is reported as missing.

use async_trait::async_trait;

use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FileId, FolderId, TeamId, UserId};
use teamdrive_entity::file::{CreateFile, File};
use teamdrive_entity::folder::Folder;
use teamdrive_entity::user::User;

/// Owns folder records.
#[async_trait]
pub trait FolderDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a folder whose id was generated by the caller.
    ///
    /// Fails with `Conflict` on a duplicate id or a second root folder,
    /// and with `NotFound` when the parent does not exist for the team.
    async fn create_folder(&self, team_id: TeamId, folder: &Folder) -> AppResult<FolderId>;

    /// The team's root folder.
    async fn get_folder_root(&self, team_id: TeamId) -> AppResult<Folder>;

    async fn get_folder_by_id(&self, team_id: TeamId, folder_id: FolderId) -> AppResult<Folder>;

    /// Immediate children of `parent_id`, ordered by name.
    async fn get_folder_content_by_id(
        &self,
        team_id: TeamId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>>;
}

/// Owns file records.
#[async_trait]
pub trait FileRegistry: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a file record and return it with its assigned id.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    async fn get_file_by_id(&self, team_id: TeamId, file_id: FileId) -> AppResult<File>;

    /// Files directly inside `folder_id`, ordered by name.
    async fn get_files_by_folder_id(
        &self,
        team_id: TeamId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>>;

    /// Replace the display name and the stored path.
    async fn rename_file(
        &self,
        team_id: TeamId,
        file_id: FileId,
        new_name: &str,
        new_path: &[String],
    ) -> AppResult<()>;

    async fn delete(&self, team_id: TeamId, file_id: FileId) -> AppResult<()>;
}

/// Read-only view of the accounts subsystem.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    async fn get_user_by_id(&self, user_id: UserId) -> AppResult<User>;
}
