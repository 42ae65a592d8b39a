use diesel::prelude::*;

use crate::infra::db::postgres::schema::roles;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = roles)]
pub struct RoleEntity {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub struct InsertRoleEntity {
    pub name: String,
}
