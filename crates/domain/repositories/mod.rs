pub mod bookings;
pub mod earnings;
pub mod machineries;
pub mod machinery_categories;
pub mod payments;
pub mod roles;
pub mod users;
pub mod worker_profiles;
