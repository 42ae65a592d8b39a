use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::machineries::MachineryEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MachineryModel {
    pub id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub availability_status: String,
    pub image_url: Option<String>,
    pub available_date: Option<NaiveDate>,
    pub is_approved: bool,
}

impl MachineryModel {
    pub fn from_entity(entity: MachineryEntity, owner_name: String, category_name: String) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            owner_name,
            category_id: entity.category_id,
            category_name,
            name: entity.name,
            description: entity.description,
            rate_per_hour_minor: entity.rate_per_hour_minor,
            rate_per_day_minor: entity.rate_per_day_minor,
            availability_status: entity.availability_status,
            image_url: entity.image_url,
            available_date: entity.available_date,
            is_approved: entity.is_approved,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertMachineryModel {
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub image_url: Option<String>,
    pub available_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditMachineryModel {
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub image_url: Option<String>,
    pub available_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachinerySearchFilter {
    pub category: Option<String>,
    pub max_rate_minor: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PendingMachineryModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub rate_per_hour_minor: i64,
    pub rate_per_day_minor: i64,
    pub image_url: Option<String>,
    pub category_name: String,
    pub owner_name: String,
    pub owner_email: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
}
