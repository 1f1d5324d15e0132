//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::types::{FileId, FolderId, TeamId};
use teamdrive_entity::file::{CreateFile, File};

use crate::contracts::FileRegistry;

const FILE_COLUMNS: &str = "id, team_id, folder_id, owner_name, name, file_path, url, \
                            file_type, path, size, extension, created_at";

/// PostgreSQL-backed file registry.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRegistry for FileRepository {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(&format!(
            "INSERT INTO files \
             (team_id, folder_id, owner_name, name, file_path, url, file_type, path, size, extension) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {FILE_COLUMNS}"
        ))
        .bind(data.team_id)
        .bind(data.folder_id)
        .bind(&data.owner_name)
        .bind(&data.name)
        .bind(&data.file_path)
        .bind(&data.url)
        .bind(&data.file_type)
        .bind(&data.path)
        .bind(data.size)
        .bind(&data.extension)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_folder_fkey") =>
            {
                AppError::not_found(format!("Folder {} not found", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Persistence, "Failed to create file", e),
        })
    }

    async fn get_file_by_id(&self, team_id: TeamId, file_id: FileId) -> AppResult<File> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE team_id = $1 AND id = $2"
        ))
        .bind(team_id)
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    async fn get_files_by_folder_id(
        &self,
        team_id: TeamId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files \
             WHERE team_id = $1 AND folder_id = $2 ORDER BY name ASC"
        ))
        .bind(team_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to list files", e))
    }

    async fn rename_file(
        &self,
        team_id: TeamId,
        file_id: FileId,
        new_name: &str,
        new_path: &[String],
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE files SET name = $3, path = $4 WHERE team_id = $1 AND id = $2")
                .bind(team_id)
                .bind(file_id)
                .bind(new_name)
                .bind(new_path)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Persistence, "Failed to rename file", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, team_id: TeamId, file_id: FileId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM files WHERE team_id = $1 AND id = $2")
            .bind(team_id)
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to delete file", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        Ok(())
    }
}
