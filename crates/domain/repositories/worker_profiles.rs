use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::worker_profiles::{
    EditWorkerProfileEntity, InsertWorkerProfileEntity, WorkerProfileEntity,
};

#[automock]
#[async_trait]
pub trait WorkerProfileRepository {
    async fn insert(&self, profile: InsertWorkerProfileEntity) -> Result<i64>;
    async fn find_by_id(&self, profile_id: i64) -> Result<Option<WorkerProfileEntity>>;
    async fn find_by_worker_id(&self, worker_user_id: i64)
    -> Result<Option<WorkerProfileEntity>>;
    async fn update_by_worker_id(
        &self,
        worker_user_id: i64,
        changes: EditWorkerProfileEntity,
    ) -> Result<()>;
    /// Approved profiles with status Available, joined with the worker's full
    /// name, optionally narrowed by a skills substring and an inclusive
    /// hourly-rate ceiling.
    async fn list_available(
        &self,
        skill: Option<String>,
        max_rate_minor: Option<i64>,
    ) -> Result<Vec<(WorkerProfileEntity, String)>>;
    /// Unapproved profiles joined with (full name, email).
    async fn list_pending(&self) -> Result<Vec<(WorkerProfileEntity, String, String)>>;
    /// Returns false when no profile exists for the user.
    async fn set_approved_by_worker_id(&self, worker_user_id: i64, approved: bool)
    -> Result<bool>;
    /// Atomically flips Available -> Booked. Returns false when the row was
    /// not currently Available, in which case nothing was written.
    async fn lock_if_available(&self, profile_id: i64) -> Result<bool>;
    async fn unlock(&self, profile_id: i64) -> Result<()>;
}
