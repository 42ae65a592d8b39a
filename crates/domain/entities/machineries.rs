use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::machineries;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = machineries)]
pub struct MachineryEntity {
    pub id: i64,
    pub owner_id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub availability_status: String,
    pub available_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = machineries)]
pub struct InsertMachineryEntity {
    pub owner_id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub availability_status: String,
    pub available_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_approved: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = machineries)]
pub struct EditMachineryEntity {
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub image_url: Option<String>,
    // Wrapped in Option so a None date is written as NULL instead of skipped.
    pub available_date: Option<Option<NaiveDate>>,
    pub availability_status: Option<String>,
    pub updated_at: DateTime<Utc>,
}
