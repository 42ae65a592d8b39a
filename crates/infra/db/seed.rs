use anyhow::{Context, Result};
use diesel::{RunQueryDsl, insert_into, prelude::*};
use tracing::info;

use crate::domain::value_objects::enums::role_names::RoleName;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{machinery_categories, roles, users},
};

pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

const ADMIN_EMAIL: &str = "admin@krishisetu.com";
const CATEGORY_NAMES: [&str; 5] = ["Tractor", "Harvester", "Plow", "Seeder", "Sprayer"];

/// Idempotent startup seeding: roles, machinery categories, and a default
/// approved admin account. The admin password hash is supplied by the caller
/// so credential handling stays out of the persistence layer.
pub fn initialize(db_pool: &PgPoolSquad, admin_password_hash: &str) -> Result<()> {
    let mut conn = db_pool.get()?;

    let role_count = roles::table.count().get_result::<i64>(&mut conn)?;
    if role_count == 0 {
        let names = [
            RoleName::Admin,
            RoleName::Farmer,
            RoleName::MachineryOwner,
            RoleName::FarmWorker,
        ];
        insert_into(roles::table)
            .values(
                names
                    .iter()
                    .map(|name| roles::name.eq(name.to_string()))
                    .collect::<Vec<_>>(),
            )
            .execute(&mut conn)?;
        info!("Roles seeded");
    }

    let category_count = machinery_categories::table
        .count()
        .get_result::<i64>(&mut conn)?;
    if category_count == 0 {
        insert_into(machinery_categories::table)
            .values(
                CATEGORY_NAMES
                    .iter()
                    .map(|name| machinery_categories::name.eq(*name))
                    .collect::<Vec<_>>(),
            )
            .execute(&mut conn)?;
        info!("Machinery categories seeded");
    }

    let admin_exists = users::table
        .filter(users::email.eq(ADMIN_EMAIL))
        .select(users::id)
        .first::<i64>(&mut conn)
        .optional()?
        .is_some();

    if !admin_exists {
        let admin_role_id = roles::table
            .filter(roles::name.eq(RoleName::Admin.to_string()))
            .select(roles::id)
            .first::<i64>(&mut conn)
            .context("admin role missing after seeding")?;

        insert_into(users::table)
            .values((
                users::role_id.eq(admin_role_id),
                users::username.eq("admin"),
                users::email.eq(ADMIN_EMAIL),
                users::password_hash.eq(admin_password_hash),
                users::full_name.eq("System Admin"),
                users::phone_number.eq("9999999999"),
                users::is_approved.eq(true),
            ))
            .execute(&mut conn)?;
        info!(email = ADMIN_EMAIL, "Default admin account seeded");
    }

    Ok(())
}
