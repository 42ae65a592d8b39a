use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::users::{RegisterUserEntity, UserEntity};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn register(&self, user: RegisterUserEntity) -> Result<i64>;
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserEntity>>;
    /// Returns the user together with its role name.
    async fn find_by_id_with_role(&self, user_id: i64) -> Result<Option<(UserEntity, String)>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn find_by_email_with_role(&self, email: &str)
    -> Result<Option<(UserEntity, String)>>;
    async fn list_with_roles(&self) -> Result<Vec<(UserEntity, String)>>;
    async fn set_approved(&self, user_id: i64) -> Result<()>;
    async fn delete(&self, user_id: i64) -> Result<()>;
    async fn count_by_role_name(&self, role_name: &str) -> Result<i64>;
}
