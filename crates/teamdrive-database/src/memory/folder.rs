use async_trait::async_trait;

use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FolderId, TeamId};
use teamdrive_entity::folder::Folder;

use super::MemoryDatabase;
use crate::contracts::FolderDirectory;

#[async_trait]
impl FolderDirectory for MemoryDatabase {
    async fn create_folder(&self, team_id: TeamId, folder: &Folder) -> AppResult<FolderId> {
        if folder.team_id != team_id {
            return Err(AppError::validation(format!(
                "Folder {} belongs to team {}, not {team_id}",
                folder.id, folder.team_id
            )));
        }

        let mut folders = self.folders.write().await;

        if folders.contains_key(&(team_id, folder.id)) {
            return Err(AppError::conflict(format!(
                "Folder {} already exists",
                folder.id
            )));
        }
        if folder.is_root()
            && folders
                .values()
                .any(|existing| existing.team_id == team_id && existing.is_root())
        {
            return Err(AppError::conflict(format!(
                "Team {team_id} already has a root folder"
            )));
        }
        if let Some(parent_id) = folder.parent_folder {
            if !folders.contains_key(&(team_id, parent_id)) {
                return Err(AppError::not_found(format!(
                    "Parent folder {parent_id} not found"
                )));
            }
        }

        folders.insert((team_id, folder.id), folder.clone());
        Ok(folder.id)
    }

    async fn get_folder_root(&self, team_id: TeamId) -> AppResult<Folder> {
        self.folders
            .read()
            .await
            .values()
            .find(|folder| folder.team_id == team_id && folder.is_root())
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Root folder for team {team_id} not found")))
    }

    async fn get_folder_by_id(&self, team_id: TeamId, folder_id: FolderId) -> AppResult<Folder> {
        self.folders
            .read()
            .await
            .get(&(team_id, folder_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    async fn get_folder_content_by_id(
        &self,
        team_id: TeamId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let mut children: Vec<Folder> = self
            .folders
            .read()
            .await
            .values()
            .filter(|folder| folder.team_id == team_id && folder.parent_folder == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(children)
    }
}
