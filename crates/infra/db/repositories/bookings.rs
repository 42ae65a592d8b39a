use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{bookings, machineries, worker_profiles},
    },
};
use domain::{
    entities::bookings::{BookingEntity, InsertBookingEntity},
    repositories::bookings::BookingRepository,
    value_objects::enums::{booking_statuses::BookingStatus, payment_statuses::PaymentStatus},
};

pub struct BookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BookingRepository for BookingPostgres {
    async fn create(&self, booking: InsertBookingEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking_id = insert_into(bookings::table)
            .values(&booking)
            .returning(bookings::id)
            .get_result::<i64>(&mut conn)?;

        Ok(booking_id)
    }

    async fn find_by_id(&self, booking_id: i64) -> Result<Option<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(BookingEntity::as_select())
            .first::<BookingEntity>(&mut conn)
            .optional()?;

        Ok(booking)
    }

    async fn set_order_ref(&self, booking_id: i64, order_ref: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set((
                bookings::payment_order_ref.eq(order_ref),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_order_ref(&self, order_ref: &str) -> Result<Option<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = bookings::table
            .filter(bookings::payment_order_ref.eq(order_ref))
            .select(BookingEntity::as_select())
            .first::<BookingEntity>(&mut conn)
            .optional()?;

        Ok(booking)
    }

    async fn list_by_farmer(&self, farmer_id: i64) -> Result<Vec<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = bookings::table
            .filter(bookings::farmer_id.eq(farmer_id))
            .select(BookingEntity::as_select())
            .order(bookings::created_at.desc())
            .load::<BookingEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_machinery_owner(&self, owner_id: i64) -> Result<Vec<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = bookings::table
            .inner_join(machineries::table)
            .filter(machineries::owner_id.eq(owner_id))
            .select(BookingEntity::as_select())
            .order(bookings::created_at.desc())
            .load::<BookingEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_worker_user(&self, worker_user_id: i64) -> Result<Vec<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = bookings::table
            .inner_join(worker_profiles::table)
            .filter(worker_profiles::worker_id.eq(worker_user_id))
            .select(BookingEntity::as_select())
            .order(bookings::created_at.desc())
            .load::<BookingEntity>(&mut conn)?;

        Ok(results)
    }

    async fn mark_paid_if_pending(&self, booking_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Guarded transition: only a Pending booking settles, and only once.
        let affected = update(
            bookings::table
                .filter(bookings::id.eq(booking_id))
                .filter(bookings::payment_status.eq(PaymentStatus::Pending.to_string())),
        )
        .set((
            bookings::payment_status.eq(PaymentStatus::Paid.to_string()),
            bookings::status.eq(BookingStatus::Completed.to_string()),
            bookings::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set((
                bookings::status.eq(status.to_string()),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn count_all(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = bookings::table.count().get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
