use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::machinery_categories},
};
use domain::{
    entities::machinery_categories::MachineryCategoryEntity,
    repositories::machinery_categories::MachineryCategoryRepository,
};

pub struct MachineryCategoryPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MachineryCategoryPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MachineryCategoryRepository for MachineryCategoryPostgres {
    async fn list(&self) -> Result<Vec<MachineryCategoryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = machinery_categories::table
            .select(MachineryCategoryEntity::as_select())
            .order(machinery_categories::name.asc())
            .load::<MachineryCategoryEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, category_id: i64) -> Result<Option<MachineryCategoryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let category = machinery_categories::table
            .filter(machinery_categories::id.eq(category_id))
            .select(MachineryCategoryEntity::as_select())
            .first::<MachineryCategoryEntity>(&mut conn)
            .optional()?;

        Ok(category)
    }
}
