pub mod postgres;
pub mod repositories;
pub mod seed;
