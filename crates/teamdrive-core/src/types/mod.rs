//! Shared domain types.

pub mod id;

pub use self::id::{FileId, FolderId, TeamId, UserId};
