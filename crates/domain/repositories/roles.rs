use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::roles::RoleEntity;

#[automock]
#[async_trait]
pub trait RoleRepository {
    async fn find_by_id(&self, role_id: i64) -> Result<Option<RoleEntity>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<RoleEntity>>;
}
