use async_trait::async_trait;

use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::types::UserId;
use teamdrive_entity::user::User;

use super::MemoryDatabase;
use crate::contracts::UserDirectory;

#[async_trait]
impl UserDirectory for MemoryDatabase {
    async fn get_user_by_id(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}
