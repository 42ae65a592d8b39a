use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{roles, users},
    },
};
use domain::{
    entities::users::{RegisterUserEntity, UserEntity},
    repositories::users::UserRepository,
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn register(&self, user: RegisterUserEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user_id = insert_into(users::table)
            .values(&user)
            .returning(users::id)
            .get_result::<i64>(&mut conn)?;

        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::id.eq(user_id))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }

    async fn find_by_id_with_role(&self, user_id: i64) -> Result<Option<(UserEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .inner_join(roles::table)
            .filter(users::id.eq(user_id))
            .select((UserEntity::as_select(), roles::name))
            .first::<(UserEntity, String)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }

    async fn find_by_email_with_role(
        &self,
        email: &str,
    ) -> Result<Option<(UserEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .inner_join(roles::table)
            .filter(users::email.eq(email))
            .select((UserEntity::as_select(), roles::name))
            .first::<(UserEntity, String)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_with_roles(&self) -> Result<Vec<(UserEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = users::table
            .inner_join(roles::table)
            .select((UserEntity::as_select(), roles::name))
            .order(users::created_at.desc())
            .load::<(UserEntity, String)>(&mut conn)?;

        Ok(results)
    }

    async fn set_approved(&self, user_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(users::table.filter(users::id.eq(user_id)))
            .set((users::is_approved.eq(true), users::updated_at.eq(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete(&self, user_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(users::table.filter(users::id.eq(user_id))).execute(&mut conn)?;

        Ok(())
    }

    async fn count_by_role_name(&self, role_name: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = users::table
            .inner_join(roles::table)
            .filter(roles::name.eq(role_name))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
