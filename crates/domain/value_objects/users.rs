use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserModel {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AuthResponseModel {
    pub token: String,
    pub username: String,
    pub role: String,
    pub is_approved: bool,
}

#[derive(Debug, Serialize)]
pub struct UserOverviewModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}
