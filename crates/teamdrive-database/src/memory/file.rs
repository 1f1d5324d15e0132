use async_trait::async_trait;
use chrono::Utc;

use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FileId, FolderId, TeamId};
use teamdrive_entity::file::{CreateFile, File};

use super::MemoryDatabase;
use crate::contracts::FileRegistry;

#[async_trait]
impl FileRegistry for MemoryDatabase {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        if !self
            .folders
            .read()
            .await
            .contains_key(&(data.team_id, data.folder_id))
        {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.folder_id
            )));
        }

        let file = File {
            id: FileId::new(),
            team_id: data.team_id,
            folder_id: data.folder_id,
            owner_name: data.owner_name.clone(),
            name: data.name.clone(),
            file_path: data.file_path.clone(),
            url: data.url.clone(),
            file_type: data.file_type.clone(),
            path: data.path.clone(),
            size: data.size,
            extension: data.extension.clone(),
            created_at: Utc::now(),
        };

        self.files
            .write()
            .await
            .insert((file.team_id, file.id), file.clone());
        Ok(file)
    }

    async fn get_file_by_id(&self, team_id: TeamId, file_id: FileId) -> AppResult<File> {
        self.files
            .read()
            .await
            .get(&(team_id, file_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    async fn get_files_by_folder_id(
        &self,
        team_id: TeamId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .files
            .read()
            .await
            .values()
            .filter(|file| file.team_id == team_id && file.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(files)
    }

    async fn rename_file(
        &self,
        team_id: TeamId,
        file_id: FileId,
        new_name: &str,
        new_path: &[String],
    ) -> AppResult<()> {
        let mut files = self.files.write().await;
        let file = files
            .get_mut(&(team_id, file_id))
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        file.name = new_name.to_string();
        file.path = new_path.to_vec();
        Ok(())
    }

    async fn delete(&self, team_id: TeamId, file_id: FileId) -> AppResult<()> {
        self.files
            .write()
            .await
            .remove(&(team_id, file_id))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }
}
