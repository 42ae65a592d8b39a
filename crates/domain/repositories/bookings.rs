use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::bookings::{BookingEntity, InsertBookingEntity};
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;

#[automock]
#[async_trait]
pub trait BookingRepository {
    async fn create(&self, booking: InsertBookingEntity) -> Result<i64>;
    async fn find_by_id(&self, booking_id: i64) -> Result<Option<BookingEntity>>;
    /// Binds the gateway order id issued for this booking so the payment
    /// verification path can find its way back to the row.
    async fn set_order_ref(&self, booking_id: i64, order_ref: &str) -> Result<()>;
    async fn find_by_order_ref(&self, order_ref: &str) -> Result<Option<BookingEntity>>;
    async fn list_by_farmer(&self, farmer_id: i64) -> Result<Vec<BookingEntity>>;
    /// Bookings whose machinery belongs to the given owner.
    async fn list_by_machinery_owner(&self, owner_id: i64) -> Result<Vec<BookingEntity>>;
    /// Bookings referencing the worker profile owned by the given user.
    async fn list_by_worker_user(&self, worker_user_id: i64) -> Result<Vec<BookingEntity>>;
    /// Guarded settlement transition: flips payment_status Pending -> Paid and
    /// status -> Completed in one conditional update. Returns false when the
    /// booking was not Pending (already settled), in which case nothing was
    /// written.
    async fn mark_paid_if_pending(&self, booking_id: i64) -> Result<bool>;
    /// Returns false when the booking does not exist.
    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<bool>;
    async fn count_all(&self) -> Result<i64>;
}
