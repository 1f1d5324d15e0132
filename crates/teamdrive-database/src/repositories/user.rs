//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use teamdrive_core::error::{AppError, ErrorKind};
use teamdrive_core::result::AppResult;
use teamdrive_core::types::UserId;
use teamdrive_entity::user::User;

use crate::contracts::UserDirectory;

/// Read-only lookups against the accounts subsystem's users table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn get_user_by_id(&self, user_id: UserId) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}
