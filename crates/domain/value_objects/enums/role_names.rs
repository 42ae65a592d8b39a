use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoleName {
    Admin,
    Farmer,
    MachineryOwner,
    FarmWorker,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::Farmer => "Farmer",
            RoleName::MachineryOwner => "MachineryOwner",
            RoleName::FarmWorker => "FarmWorker",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(RoleName::Admin),
            "Farmer" => Some(RoleName::Farmer),
            "MachineryOwner" => Some(RoleName::MachineryOwner),
            "FarmWorker" => Some(RoleName::FarmWorker),
            _ => None,
        }
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
