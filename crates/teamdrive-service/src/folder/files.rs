//! File operations of the folder service.

use teamdrive_core::deadline::with_deadline;
use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::ByteStream;
use teamdrive_core::types::FileId;
use teamdrive_entity::file::{ContentCategory, CreateFile, File, normalize_extension};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::path::{extend_file_path, folder_lineage, rename_in_path};
use super::service::FolderService;
use super::view::{FileContent, FileView, RenamedFile};
use crate::context::RequestContext;

/// Parameters for placing a new file in the folder tree.
pub struct CreateFileInput {
    /// Display name, including the extension.
    pub display_name: String,
    /// Extension of the uploaded file, with or without the leading dot.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Target folder id; the team root when absent or blank.
    pub folder: Option<String>,
    pub data: ByteStream,
}

impl std::fmt::Debug for CreateFileInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateFileInput")
            .field("display_name", &self.display_name)
            .field("extension", &self.extension)
            .field("size", &self.size)
            .field("folder", &self.folder)
            .finish()
    }
}

/// Opaque object name: a fresh UUID plus the extension.
pub(super) fn object_name_for(extension: &str) -> String {
    let id = Uuid::new_v4();
    if extension.is_empty() {
        id.to_string()
    } else {
        format!("{id}.{extension}")
    }
}

impl FolderService {
    /// Upload a file into a folder and register it.
    ///
    /// The bytes are stored before the record is written. If anything
    /// fails after the upload, the orphaned object is deleted on a best
    /// effort basis.
    pub async fn create_file(
        &self,
        ctx: &RequestContext,
        input: CreateFileInput,
    ) -> AppResult<FileView> {
        let display_name = input.display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(AppError::empty_file_name());
        }
        let size = i64::try_from(input.size)
            .map_err(|_| AppError::validation(format!("File size {} is too large", input.size)))?;

        let folder = self
            .resolve_folder(ctx.team_id, input.folder.as_deref())
            .await?;
        let owner = with_deadline(
            self.timeouts.metadata_read(),
            "get_user_by_id",
            self.users.get_user_by_id(ctx.user_id),
        )
        .await?;

        let extension = normalize_extension(&input.extension);
        let object_name = object_name_for(&extension);
        let bucket = self.storage.document_bucket();

        with_deadline(
            self.timeouts.transfer(),
            "upload_file",
            self.storage.gateway().upload_file(
                bucket,
                &object_name,
                &display_name,
                input.size,
                input.data,
            ),
        )
        .await?;

        let record = CreateFile {
            team_id: ctx.team_id,
            folder_id: folder.id,
            owner_name: owner.display_name(),
            url: self.storage.object_url(bucket, &object_name),
            file_type: ContentCategory::type_tag(&extension),
            path: extend_file_path(folder_lineage(&folder), &display_name),
            name: display_name,
            file_path: object_name,
            size,
            extension,
        };

        let created = with_deadline(
            self.timeouts.metadata_write(),
            "create_file",
            self.files.create(&record),
        )
        .await;

        match created {
            Ok(file) => {
                info!(
                    team_id = %ctx.team_id,
                    user_id = %ctx.user_id,
                    file_id = %file.id,
                    folder_id = %file.folder_id,
                    object = %file.file_path,
                    size = file.size,
                    "File created"
                );
                Ok(FileView::from(&file))
            }
            Err(e) => {
                self.remove_orphan(bucket, &record.file_path, &e).await;
                Err(e)
            }
        }
    }

    /// Delete an object whose metadata could not be written.
    async fn remove_orphan(&self, bucket: &str, object_name: &str, cause: &AppError) {
        let removed = with_deadline(
            self.timeouts.object_delete(),
            "delete_file",
            self.storage.gateway().delete_file(bucket, object_name),
        )
        .await;

        match removed {
            Ok(()) => warn!(
                bucket,
                object = object_name,
                cause = %cause,
                "Removed orphaned object after failed registration"
            ),
            Err(e) => warn!(
                bucket,
                object = object_name,
                cause = %cause,
                error = %e,
                "Failed to remove orphaned object; it remains in storage"
            ),
        }
    }

    /// Rename a file, keeping its extension.
    ///
    /// Only the display name and the last element of the stored path
    /// change. The stored object is untouched.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: &str,
        new_base_name: &str,
    ) -> AppResult<RenamedFile> {
        let base_name = new_base_name.trim();
        if base_name.is_empty() {
            return Err(AppError::empty_file_name());
        }

        let file = self.file_by_id(ctx, file_id).await?;
        let new_name = file.renamed(base_name);
        let new_path = rename_in_path(&file.path, &new_name);

        with_deadline(
            self.timeouts.metadata_write(),
            "rename_file",
            self.files
                .rename_file(ctx.team_id, file.id, &new_name, &new_path),
        )
        .await?;

        info!(
            team_id = %ctx.team_id,
            file_id = %file.id,
            old_name = %file.name,
            new_name = %new_name,
            "File renamed"
        );
        Ok(RenamedFile {
            id: file.id,
            name: new_name,
        })
    }

    /// A time-limited read URL for a file's object.
    pub async fn get_file_presigned_url(
        &self,
        ctx: &RequestContext,
        file_id: &str,
    ) -> AppResult<String> {
        let file = self.file_by_id(ctx, file_id).await?;
        with_deadline(
            self.timeouts.presign(),
            "get_file_presigned_url",
            self.storage.gateway().get_file_presigned_url(
                self.storage.document_bucket(),
                &file.file_path,
                self.presign_ttl,
            ),
        )
        .await
    }

    /// A file's metadata together with its bytes.
    pub async fn read_file(&self, ctx: &RequestContext, file_id: &str) -> AppResult<FileContent> {
        let file = self.file_by_id(ctx, file_id).await?;
        let data = with_deadline(
            self.timeouts.transfer(),
            "get_file",
            self.storage
                .gateway()
                .get_file(self.storage.document_bucket(), &file.file_path),
        )
        .await?;

        Ok(FileContent {
            file: FileView::from(&file),
            data,
        })
    }

    /// Delete a file's object, then its record.
    ///
    /// If the record cannot be removed after the object is gone, the
    /// dangling record is logged and the error returned.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: &str) -> AppResult<()> {
        let file = self.file_by_id(ctx, file_id).await?;
        let bucket = self.storage.document_bucket();

        with_deadline(
            self.timeouts.object_delete(),
            "delete_file",
            self.storage.gateway().delete_file(bucket, &file.file_path),
        )
        .await?;

        if let Err(e) = with_deadline(
            self.timeouts.metadata_delete(),
            "delete_file_record",
            self.files.delete(ctx.team_id, file.id),
        )
        .await
        {
            error!(
                team_id = %ctx.team_id,
                file_id = %file.id,
                object = %file.file_path,
                error = %e,
                "File record left dangling after its object was deleted"
            );
            return Err(e);
        }

        info!(
            team_id = %ctx.team_id,
            user_id = %ctx.user_id,
            file_id = %file.id,
            "File deleted"
        );
        Ok(())
    }

    async fn file_by_id(&self, ctx: &RequestContext, file_id: &str) -> AppResult<File> {
        let file_id = FileId::parse(file_id)?;
        with_deadline(
            self.timeouts.metadata_read(),
            "get_file_by_id",
            self.files.get_file_by_id(ctx.team_id, file_id),
        )
        .await
    }
}
