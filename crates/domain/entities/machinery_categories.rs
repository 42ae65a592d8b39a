use diesel::prelude::*;

use crate::infra::db::postgres::schema::machinery_categories;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = machinery_categories)]
pub struct MachineryCategoryEntity {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = machinery_categories)]
pub struct InsertMachineryCategoryEntity {
    pub name: String,
}
