//! Process-local implementations of the persistence contracts.
//!
//! [`MemoryDatabase`] keeps every table in a map keyed by `(team_id, id)`
//! and enforces the same uniqueness and not-found rules as the
//! PostgreSQL schema. It backs `database.provider = "memory"` and the
//! test suites.

mod file;
mod folder;
mod user;

use std::collections::HashMap;

use tokio::sync::RwLock;

use teamdrive_core::types::{FileId, FolderId, TeamId, UserId};
use teamdrive_entity::file::File;
use teamdrive_entity::folder::Folder;
use teamdrive_entity::user::User;

/// In-memory folder directory, file registry and user directory.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    folders: RwLock<HashMap<(TeamId, FolderId), Folder>>,
    files: RwLock<HashMap<(TeamId, FileId), File>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record, as the accounts subsystem would.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}
