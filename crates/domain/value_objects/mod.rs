pub mod admin;
pub mod bookings;
pub mod enums;
pub mod machineries;
pub mod users;
pub mod workers;
