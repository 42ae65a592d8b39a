use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::machinery_categories::MachineryCategoryEntity;

#[automock]
#[async_trait]
pub trait MachineryCategoryRepository {
    async fn list(&self) -> Result<Vec<MachineryCategoryEntity>>;
    async fn find_by_id(&self, category_id: i64) -> Result<Option<MachineryCategoryEntity>>;
}
