pub mod auth;
pub mod axum_http;
pub mod config;
pub mod mailer;
pub mod usecases;
