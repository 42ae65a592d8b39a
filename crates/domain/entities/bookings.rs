use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::bookings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = bookings)]
pub struct BookingEntity {
    pub id: i64,
    pub farmer_id: i64,
    pub machinery_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount_minor: i64,
    pub status: String,
    pub payment_status: String,
    pub payment_order_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct InsertBookingEntity {
    pub farmer_id: i64,
    pub machinery_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount_minor: i64,
    pub status: String,
    pub payment_status: String,
}
