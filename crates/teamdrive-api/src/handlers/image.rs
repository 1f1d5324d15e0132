//! Standalone image handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;

use teamdrive_core::error::AppError;
use teamdrive_core::traits::storage::bytes_stream;
use teamdrive_service::UploadImageInput;
use teamdrive_service::folder::ImageUpload;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::TeamSession;
use crate::handlers::file::{UploadForm, extension_of};
use crate::state::AppState;

/// POST /api/images (multipart: `file`)
pub async fn upload_image(
    State(state): State<AppState>,
    _session: TeamSession,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageUpload>>), ApiError> {
    let form = UploadForm::read(multipart).await?;
    let data = form
        .data
        .ok_or_else(|| AppError::validation("No file provided"))?;
    let file_name = form.original_name.unwrap_or_default();

    let input = UploadImageInput {
        extension: extension_of(&file_name).to_string(),
        file_name,
        size: data.len() as u64,
        data: bytes_stream(data),
    };

    let image = state.folder_service.upload_image(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image))))
}

/// DELETE /api/images/{key}
pub async fn delete_image(
    State(state): State<AppState>,
    _session: TeamSession,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.folder_service.delete_image(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
