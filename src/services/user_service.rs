use std::sync::Arc;

use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::UserPublic;
use crate::repositories::user_repository::UserRepository;

/// Admin-facing user operations.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        UserService { users }
    }

    pub async fn list_users(&self) -> Result<Vec<UserPublic>, ApiError> {
        let users = self.users.read_all().await?;
        Ok(users.iter().map(UserPublic::from).collect())
    }

    pub async fn set_banned(&self, id: Uuid, banned: bool) -> Result<(), ApiError> {
        if self.users.set_banned(id, banned).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound("user"))
        }
    }
}
