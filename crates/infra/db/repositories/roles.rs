use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::roles},
};
use domain::{entities::roles::RoleEntity, repositories::roles::RoleRepository};

pub struct RolePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RolePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl RoleRepository for RolePostgres {
    async fn find_by_id(&self, role_id: i64) -> Result<Option<RoleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let role = roles::table
            .filter(roles::id.eq(role_id))
            .select(RoleEntity::as_select())
            .first::<RoleEntity>(&mut conn)
            .optional()?;

        Ok(role)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<RoleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let role = roles::table
            .filter(roles::name.eq(name))
            .select(RoleEntity::as_select())
            .first::<RoleEntity>(&mut conn)
            .optional()?;

        Ok(role)
    }
}
