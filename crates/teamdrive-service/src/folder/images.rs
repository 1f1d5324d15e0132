//! Standalone images (avatars, banners) kept outside the folder tree.

use teamdrive_core::deadline::with_deadline;
use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::ByteStream;
use teamdrive_entity::file::ImageFormat;
use tracing::info;

use super::files::object_name_for;
use super::service::FolderService;
use super::view::ImageUpload;

/// Parameters for a standalone image upload.
pub struct UploadImageInput {
    /// Original file name, recorded as object metadata.
    pub file_name: String,
    /// Extension, checked against the image allow-list.
    pub extension: String,
    pub size: u64,
    pub data: ByteStream,
}

impl std::fmt::Debug for UploadImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadImageInput")
            .field("file_name", &self.file_name)
            .field("extension", &self.extension)
            .field("size", &self.size)
            .finish()
    }
}

impl FolderService {
    /// Store an image in the image bucket and return its URL and key.
    ///
    /// Only jpg, jpeg, png and svg are accepted. No metadata record is
    /// kept; the caller owns the returned key.
    pub async fn upload_image(&self, input: UploadImageInput) -> AppResult<ImageUpload> {
        let format = ImageFormat::from_extension(&input.extension)?;
        let object_name = object_name_for(format.extension());
        let bucket = self.storage.image_bucket();

        with_deadline(
            self.timeouts.transfer(),
            "upload_image",
            self.storage.gateway().upload_file(
                bucket,
                &object_name,
                &input.file_name,
                input.size,
                input.data,
            ),
        )
        .await?;

        info!(object = %object_name, size = input.size, "Image uploaded");
        Ok(ImageUpload {
            url: self.storage.object_url(bucket, &object_name),
            path: object_name,
        })
    }

    /// Delete an image by the key returned from [`upload_image`](Self::upload_image).
    pub async fn delete_image(&self, key: &str) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::validation("image key can't be empty"));
        }

        with_deadline(
            self.timeouts.object_delete(),
            "delete_image",
            self.storage
                .gateway()
                .delete_file(self.storage.image_bucket(), key),
        )
        .await?;

        info!(object = %key, "Image deleted");
        Ok(())
    }
}
