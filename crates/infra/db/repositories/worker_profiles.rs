use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{users, worker_profiles},
    },
};
use domain::{
    entities::worker_profiles::{
        EditWorkerProfileEntity, InsertWorkerProfileEntity, WorkerProfileEntity,
    },
    repositories::worker_profiles::WorkerProfileRepository,
    value_objects::enums::availability_statuses::AvailabilityStatus,
};

pub struct WorkerProfilePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl WorkerProfilePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WorkerProfileRepository for WorkerProfilePostgres {
    async fn insert(&self, profile: InsertWorkerProfileEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let profile_id = insert_into(worker_profiles::table)
            .values(&profile)
            .returning(worker_profiles::id)
            .get_result::<i64>(&mut conn)?;

        Ok(profile_id)
    }

    async fn find_by_id(&self, profile_id: i64) -> Result<Option<WorkerProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let profile = worker_profiles::table
            .filter(worker_profiles::id.eq(profile_id))
            .select(WorkerProfileEntity::as_select())
            .first::<WorkerProfileEntity>(&mut conn)
            .optional()?;

        Ok(profile)
    }

    async fn find_by_worker_id(
        &self,
        worker_user_id: i64,
    ) -> Result<Option<WorkerProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let profile = worker_profiles::table
            .filter(worker_profiles::worker_id.eq(worker_user_id))
            .select(WorkerProfileEntity::as_select())
            .first::<WorkerProfileEntity>(&mut conn)
            .optional()?;

        Ok(profile)
    }

    async fn update_by_worker_id(
        &self,
        worker_user_id: i64,
        changes: EditWorkerProfileEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(worker_profiles::table.filter(worker_profiles::worker_id.eq(worker_user_id)))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_available(
        &self,
        skill: Option<String>,
        max_rate_minor: Option<i64>,
    ) -> Result<Vec<(WorkerProfileEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = worker_profiles::table
            .inner_join(users::table)
            .filter(worker_profiles::is_approved.eq(true))
            .filter(
                worker_profiles::availability_status
                    .eq(AvailabilityStatus::Available.to_string()),
            )
            .select((WorkerProfileEntity::as_select(), users::full_name))
            .into_boxed();

        if let Some(skill) = skill {
            query = query.filter(worker_profiles::skills.like(format!("%{skill}%")));
        }

        if let Some(max_rate_minor) = max_rate_minor {
            query = query.filter(worker_profiles::hourly_rate_minor.le(max_rate_minor));
        }

        let results = query.load::<(WorkerProfileEntity, String)>(&mut conn)?;

        Ok(results)
    }

    async fn list_pending(&self) -> Result<Vec<(WorkerProfileEntity, String, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = worker_profiles::table
            .inner_join(users::table)
            .filter(worker_profiles::is_approved.eq(false))
            .select((
                WorkerProfileEntity::as_select(),
                users::full_name,
                users::email,
            ))
            .load::<(WorkerProfileEntity, String, String)>(&mut conn)?;

        Ok(results)
    }

    async fn set_approved_by_worker_id(
        &self,
        worker_user_id: i64,
        approved: bool,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(
            worker_profiles::table.filter(worker_profiles::worker_id.eq(worker_user_id)),
        )
        .set((
            worker_profiles::is_approved.eq(approved),
            worker_profiles::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn lock_if_available(&self, profile_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Conditional update so two concurrent bookings cannot both win the row.
        let affected = update(
            worker_profiles::table
                .filter(worker_profiles::id.eq(profile_id))
                .filter(
                    worker_profiles::availability_status
                        .eq(AvailabilityStatus::Available.to_string()),
                ),
        )
        .set((
            worker_profiles::availability_status.eq(AvailabilityStatus::Booked.to_string()),
            worker_profiles::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn unlock(&self, profile_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(worker_profiles::table.filter(worker_profiles::id.eq(profile_id)))
            .set((
                worker_profiles::availability_status
                    .eq(AvailabilityStatus::Available.to_string()),
                worker_profiles::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
