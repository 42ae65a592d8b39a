use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::earnings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = earnings)]
pub struct EarningEntity {
    pub id: i64,
    pub user_id: i64,
    pub booking_id: i64,
    pub amount_minor: i64,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = earnings)]
pub struct InsertEarningEntity {
    pub user_id: i64,
    pub booking_id: i64,
    pub amount_minor: i64,
}
