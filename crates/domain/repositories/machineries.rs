use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::machineries::{
    EditMachineryEntity, InsertMachineryEntity, MachineryEntity,
};

#[automock]
#[async_trait]
pub trait MachineryRepository {
    async fn insert(&self, machinery: InsertMachineryEntity) -> Result<i64>;
    async fn find_by_id(&self, machinery_id: i64) -> Result<Option<MachineryEntity>>;
    async fn update(&self, machinery_id: i64, changes: EditMachineryEntity) -> Result<()>;
    /// Approved listings with status Available, joined with owner and category
    /// names, optionally narrowed by exact category name and an inclusive
    /// hourly-rate ceiling.
    async fn list_available(
        &self,
        category: Option<String>,
        max_rate_minor: Option<i64>,
    ) -> Result<Vec<(MachineryEntity, String, String)>>;
    /// Listings of one owner joined with their category name.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<(MachineryEntity, String)>>;
    /// Unapproved listings joined with (owner name, owner email, category name).
    async fn list_pending(&self) -> Result<Vec<(MachineryEntity, String, String, String)>>;
    async fn set_approved(&self, machinery_id: i64) -> Result<()>;
    async fn delete(&self, machinery_id: i64) -> Result<()>;
    /// Atomically flips Available -> Booked. Returns false when the row was
    /// not currently Available, in which case nothing was written.
    async fn lock_if_available(&self, machinery_id: i64) -> Result<bool>;
    async fn unlock(&self, machinery_id: i64) -> Result<()>;
    async fn count_all(&self) -> Result<i64>;
}
