//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FolderId, TeamId};
use teamdrive_entity::folder::{Folder, FolderType};

use crate::contracts::FolderDirectory;

const FOLDER_COLUMNS: &str =
    "id, team_id, name, folder_type, path, parent_folder, created_at, last_modified_time";

/// PostgreSQL-backed folder directory.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderDirectory for FolderRepository {
    async fn create_folder(&self, team_id: TeamId, folder: &Folder) -> AppResult<FolderId> {
        if folder.team_id != team_id {
            return Err(AppError::validation(format!(
                "Folder {} belongs to team {}, not {team_id}",
                folder.id, folder.team_id
            )));
        }

        sqlx::query(
            "INSERT INTO folders \
             (team_id, id, name, folder_type, path, parent_folder, created_at, last_modified_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(team_id)
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.folder_type)
        .bind(Json(&folder.path))
        .bind(folder.parent_folder)
        .bind(folder.created_at)
        .bind(folder.last_modified_time)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_team_root_key") =>
            {
                AppError::conflict(format!("Team {team_id} already has a root folder"))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("folders_pkey") => {
                AppError::conflict(format!("Folder {} already exists", folder.id))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_parent_fkey") =>
            {
                AppError::not_found(format!(
                    "Parent folder {} not found",
                    folder
                        .parent_folder
                        .map(|id| id.to_string())
                        .unwrap_or_default()
                ))
            }
            _ => AppError::with_source(ErrorKind::Persistence, "Failed to create folder", e),
        })?;

        Ok(folder.id)
    }

    async fn get_folder_root(&self, team_id: TeamId) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE team_id = $1 AND folder_type = $2"
        ))
        .bind(team_id)
        .bind(FolderType::Root)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find root folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Root folder for team {team_id} not found")))
    }

    async fn get_folder_by_id(&self, team_id: TeamId, folder_id: FolderId) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE team_id = $1 AND id = $2"
        ))
        .bind(team_id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    async fn get_folder_content_by_id(
        &self,
        team_id: TeamId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders \
             WHERE team_id = $1 AND parent_folder = $2 ORDER BY name ASC"
        ))
        .bind(team_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to list child folders", e))
    }
}
