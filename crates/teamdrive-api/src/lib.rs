//! # teamdrive-api
//!
//! HTTP API layer for TeamDrive built on Axum.
//!
//! Maps HTTP verbs onto folder service operations: routes, the team
//! identity extractor, DTOs, error mapping and request logging.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
