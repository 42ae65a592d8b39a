pub mod availability_statuses;
pub mod booking_statuses;
pub mod payment_statuses;
pub mod role_names;
