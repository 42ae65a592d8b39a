use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::earnings},
};
use domain::{
    entities::earnings::InsertEarningEntity, repositories::earnings::EarningRepository,
};

pub struct EarningPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EarningPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl EarningRepository for EarningPostgres {
    async fn record_earning(&self, earning: InsertEarningEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let earning_id = insert_into(earnings::table)
            .values(&earning)
            .returning(earnings::id)
            .get_result::<i64>(&mut conn)?;

        Ok(earning_id)
    }
}
