use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::earnings::InsertEarningEntity;

#[automock]
#[async_trait]
pub trait EarningRepository {
    async fn record_earning(&self, earning: InsertEarningEntity) -> Result<i64>;
}
