use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::booking_statuses::BookingStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingModel {
    pub machinery_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingModel {
    pub id: i64,
    pub farmer_id: i64,
    pub farmer_name: String,
    pub machinery_id: Option<i64>,
    pub machinery_name: Option<String>,
    pub worker_id: Option<i64>,
    pub worker_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount_minor: i64,
    pub status: String,
    pub payment_status: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking: BookingModel,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentModel {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentOutcome {
    pub verified: bool,
    pub booking_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatusModel {
    pub status: BookingStatus,
}
