//! # teamdrive-database
//!
//! Persistence contracts for folders, files and users, with a PostgreSQL
//! backend and an in-memory backend.

pub mod connection;
pub mod contracts;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use contracts::{FileRegistry, FolderDirectory, UserDirectory};
pub use memory::MemoryDatabase;
