//! Convenience result type alias for TeamDrive.

use crate::error::AppError;

/// A specialized `Result` type for TeamDrive operations.
pub type AppResult<T> = Result<T, AppError>;
