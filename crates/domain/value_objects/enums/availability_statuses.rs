use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Booked,
    Maintenance,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Booked => "Booked",
            AvailabilityStatus::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(AvailabilityStatus::Available),
            "Booked" => Some(AvailabilityStatus::Booked),
            "Maintenance" => Some(AvailabilityStatus::Maintenance),
            _ => None,
        }
    }
}

impl Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
