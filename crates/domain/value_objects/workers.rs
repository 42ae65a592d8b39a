use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::worker_profiles::WorkerProfileEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerProfileModel {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub availability_status: String,
    pub bio: String,
    pub available_date: Option<NaiveDate>,
    pub is_approved: bool,
}

impl WorkerProfileModel {
    pub fn from_entity(entity: WorkerProfileEntity, worker_name: String) -> Self {
        Self {
            id: entity.id,
            worker_id: entity.worker_id,
            worker_name,
            skills: entity.skills,
            experience_years: entity.experience_years,
            hourly_rate_minor: entity.hourly_rate_minor,
            availability_status: entity.availability_status,
            bio: entity.bio,
            available_date: entity.available_date,
            is_approved: entity.is_approved,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditWorkerProfileModel {
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub bio: String,
    pub available_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerSearchFilter {
    pub skill: Option<String>,
    pub max_rate_minor: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PendingWorkerModel {
    pub id: i64,
    pub worker_id: i64,
    pub full_name: String,
    pub email: String,
    pub skills: String,
    pub experience_years: i32,
    pub hourly_rate_minor: i64,
    pub bio: String,
}
