pub mod admin;
pub mod auth;
pub mod farmer;
pub mod machinery;
pub mod owner;
pub mod worker;
