//! User entity model.
//!
//! Users are owned by the accounts subsystem. Only the fields needed to
//! denormalize an owner name onto uploaded files are read here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamdrive_core::types::UserId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl User {
    /// `"First Last"`, trimmed when either part is missing.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
