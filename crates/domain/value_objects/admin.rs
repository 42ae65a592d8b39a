use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminStatsModel {
    pub total_farmers: i64,
    pub total_machinery_owners: i64,
    pub total_workers: i64,
    pub total_machinery_listings: i64,
    pub total_bookings: i64,
    pub total_earnings_minor: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApprovalQuery {
    pub approve: bool,
}
