use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::worker_profiles;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = worker_profiles)]
pub struct WorkerProfileEntity {
    pub id: i64,
    pub worker_id: i64,
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub availability_status: String,
    pub bio: String,
    pub available_date: Option<NaiveDate>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = worker_profiles)]
pub struct InsertWorkerProfileEntity {
    pub worker_id: i64,
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub availability_status: String,
    pub bio: String,
    pub available_date: Option<NaiveDate>,
    pub is_approved: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = worker_profiles)]
pub struct EditWorkerProfileEntity {
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub bio: String,
    // Wrapped in Option so a None date is written as NULL instead of skipped.
    pub available_date: Option<Option<NaiveDate>>,
    pub availability_status: Option<String>,
    pub updated_at: DateTime<Utc>,
}
