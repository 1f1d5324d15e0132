//! File upload, rename, URL, download and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use teamdrive_core::error::AppError;
use teamdrive_core::traits::storage::bytes_stream;
use teamdrive_service::CreateFileInput;
use teamdrive_service::folder::{FileView, RenamedFile};

use crate::dto::request::{RenameFileRequest, validate};
use crate::dto::response::{ApiResponse, PresignedUrlResponse};
use crate::error::ApiError;
use crate::extractors::TeamSession;
use crate::state::AppState;

/// Parts of a multipart upload: the file itself plus optional text fields.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub file_name: Option<String>,
    pub folder: Option<String>,
    pub original_name: Option<String>,
    pub data: Option<Bytes>,
}

impl UploadForm {
    /// Drain a multipart body. Unknown fields are ignored.
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    form.original_name = field.file_name().map(|s| s.to_string());
                    form.data = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                    );
                }
                "fileName" => {
                    form.file_name = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                    );
                }
                "folder" => {
                    form.folder = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                    );
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Extension of an uploaded file name, without the dot. Empty if none.
pub(crate) fn extension_of(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}

/// POST /api/files (multipart: `file`, `fileName`, `folder`)
pub async fn create_file(
    State(state): State<AppState>,
    session: TeamSession,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileView>>), ApiError> {
    let form = UploadForm::read(multipart).await?;
    let data = form
        .data
        .ok_or_else(|| AppError::validation("No file provided"))?;
    let original_name = form.original_name.unwrap_or_default();

    let input = CreateFileInput {
        display_name: form.file_name.unwrap_or_else(|| original_name.clone()),
        extension: extension_of(&original_name).to_string(),
        size: data.len() as u64,
        folder: form.folder,
        data: bytes_stream(data),
    };

    let file = state.folder_service.create_file(&session, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// PATCH /api/files
pub async fn rename_file(
    State(state): State<AppState>,
    session: TeamSession,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<ApiResponse<RenamedFile>>, ApiError> {
    validate(&req)?;

    let renamed = state
        .folder_service
        .rename_file(&session, &req.id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(renamed)))
}

/// GET /api/files/url/{id}
pub async fn get_file_url(
    State(state): State<AppState>,
    session: TeamSession,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PresignedUrlResponse>>, ApiError> {
    let url = state
        .folder_service
        .get_file_presigned_url(&session, &id)
        .await?;
    Ok(Json(ApiResponse::ok(PresignedUrlResponse { url })))
}

/// GET /api/files/{id}/content
pub async fn download_file(
    State(state): State<AppState>,
    session: TeamSession,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let content = state.folder_service.read_file(&session, &id).await?;
    let file_name = content.file.name.replace('"', "");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .header(header::CONTENT_LENGTH, content.data.len())
        .body(Body::from(content.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    session: TeamSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.folder_service.delete_file(&session, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
