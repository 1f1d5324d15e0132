//! Route definitions for the TeamDrive HTTP API.
//!
//! All routes are mounted under `/api`. Identity comes from the
//! [`TeamSession`](crate::extractors::TeamSession) extractor on each handler.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload =
        usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(image_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder tree
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/folders/root",
            post(handlers::folder::create_root_folder).get(handlers::folder::get_folder_root),
        )
        .route("/files/folders", post(handlers::folder::create_folder))
        .route(
            "/files/folders/{id}",
            get(handlers::folder::get_folder_content),
        )
}

/// Files inside the tree
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            post(handlers::file::create_file).patch(handlers::file::rename_file),
        )
        .route("/files/url/{id}", get(handlers::file::get_file_url))
        .route("/files/{id}/content", get(handlers::file::download_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
}

/// Standalone images
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images", post(handlers::image::upload_image))
        .route("/images/{key}", delete(handlers::image::delete_image))
}

/// Health check (no identity required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
