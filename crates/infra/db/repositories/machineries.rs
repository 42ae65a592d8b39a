use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{machineries, machinery_categories, users},
    },
};
use domain::{
    entities::machineries::{EditMachineryEntity, InsertMachineryEntity, MachineryEntity},
    repositories::machineries::MachineryRepository,
    value_objects::enums::availability_statuses::AvailabilityStatus,
};

pub struct MachineryPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MachineryPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MachineryRepository for MachineryPostgres {
    async fn insert(&self, machinery: InsertMachineryEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let machinery_id = insert_into(machineries::table)
            .values(&machinery)
            .returning(machineries::id)
            .get_result::<i64>(&mut conn)?;

        Ok(machinery_id)
    }

    async fn find_by_id(&self, machinery_id: i64) -> Result<Option<MachineryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let machinery = machineries::table
            .filter(machineries::id.eq(machinery_id))
            .select(MachineryEntity::as_select())
            .first::<MachineryEntity>(&mut conn)
            .optional()?;

        Ok(machinery)
    }

    async fn update(&self, machinery_id: i64, changes: EditMachineryEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(machineries::table.filter(machineries::id.eq(machinery_id)))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_available(
        &self,
        category: Option<String>,
        max_rate_minor: Option<i64>,
    ) -> Result<Vec<(MachineryEntity, String, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = machineries::table
            .inner_join(users::table)
            .inner_join(machinery_categories::table)
            .filter(machineries::is_approved.eq(true))
            .filter(
                machineries::availability_status.eq(AvailabilityStatus::Available.to_string()),
            )
            .select((
                MachineryEntity::as_select(),
                users::full_name,
                machinery_categories::name,
            ))
            .into_boxed();

        if let Some(category) = category {
            query = query.filter(machinery_categories::name.eq(category));
        }

        if let Some(max_rate_minor) = max_rate_minor {
            query = query.filter(machineries::rate_per_hour_minor.le(max_rate_minor));
        }

        let results = query.load::<(MachineryEntity, String, String)>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<(MachineryEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = machineries::table
            .inner_join(machinery_categories::table)
            .filter(machineries::owner_id.eq(owner_id))
            .select((MachineryEntity::as_select(), machinery_categories::name))
            .order(machineries::created_at.desc())
            .load::<(MachineryEntity, String)>(&mut conn)?;

        Ok(results)
    }

    async fn list_pending(&self) -> Result<Vec<(MachineryEntity, String, String, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = machineries::table
            .inner_join(users::table)
            .inner_join(machinery_categories::table)
            .filter(machineries::is_approved.eq(false))
            .select((
                MachineryEntity::as_select(),
                users::full_name,
                users::email,
                machinery_categories::name,
            ))
            .load::<(MachineryEntity, String, String, String)>(&mut conn)?;

        Ok(results)
    }

    async fn set_approved(&self, machinery_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(machineries::table.filter(machineries::id.eq(machinery_id)))
            .set((
                machineries::is_approved.eq(true),
                machineries::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete(&self, machinery_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(machineries::table.filter(machineries::id.eq(machinery_id)))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn lock_if_available(&self, machinery_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Conditional update so two concurrent bookings cannot both win the row.
        let affected = update(
            machineries::table
                .filter(machineries::id.eq(machinery_id))
                .filter(
                    machineries::availability_status
                        .eq(AvailabilityStatus::Available.to_string()),
                ),
        )
        .set((
            machineries::availability_status.eq(AvailabilityStatus::Booked.to_string()),
            machineries::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn unlock(&self, machinery_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(machineries::table.filter(machineries::id.eq(machinery_id)))
            .set((
                machineries::availability_status.eq(AvailabilityStatus::Available.to_string()),
                machineries::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn count_all(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = machineries::table.count().get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
