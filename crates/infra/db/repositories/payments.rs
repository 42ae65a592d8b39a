use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, dsl::sql, insert_into, prelude::*, sql_types::BigInt};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::payments},
};
use domain::{entities::payments::NewPaymentEntity, repositories::payments::PaymentRepository};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_payment(&self, payment: NewPaymentEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = insert_into(payments::table)
            .values(&payment)
            .returning(payments::id)
            .get_result::<i64>(&mut conn)?;

        Ok(payment_id)
    }

    async fn total_amount_minor(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // SUM over BIGINT yields NUMERIC in Postgres; cast back down.
        let total = payments::table
            .select(sql::<BigInt>("COALESCE(SUM(amount_minor), 0)::BIGINT"))
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}
