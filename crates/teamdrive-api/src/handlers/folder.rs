//! Folder tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use teamdrive_service::folder::{FolderListing, FolderView};

use crate::dto::request::{CreateFolderRequest, validate};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::TeamSession;
use crate::state::AppState;

/// POST /api/files/folders/root
pub async fn create_root_folder(
    State(state): State<AppState>,
    session: TeamSession,
) -> Result<(StatusCode, Json<ApiResponse<FolderView>>), ApiError> {
    let root = state
        .folder_service
        .create_root_folder(session.team_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(root))))
}

/// GET /api/files/folders/root
pub async fn get_folder_root(
    State(state): State<AppState>,
    session: TeamSession,
) -> Result<Json<ApiResponse<FolderListing>>, ApiError> {
    let listing = state.folder_service.get_folder_root(&session).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// POST /api/files/folders
pub async fn create_folder(
    State(state): State<AppState>,
    session: TeamSession,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderView>>), ApiError> {
    validate(&req)?;

    let folder = state
        .folder_service
        .create_folder(&session, &req.name, req.parent_folder.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/files/folders/{id}
pub async fn get_folder_content(
    State(state): State<AppState>,
    session: TeamSession,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FolderListing>>, ApiError> {
    let listing = state
        .folder_service
        .get_folder_content(&session, &id)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}
