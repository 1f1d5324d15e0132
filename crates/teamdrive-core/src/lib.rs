//! # teamdrive-core
//!
//! Core crate for TeamDrive. Contains the storage gateway trait,
//! configuration schemas, typed identifiers, the per-call deadline
//! helper, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TeamDrive crates.

pub mod config;
pub mod deadline;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
