use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which portal a login targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    Student,
    Admin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown portal role: {0}")]
pub struct UnknownRole(pub String);

impl PortalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalRole::Student => "student",
            PortalRole::Admin => "admin",
        }
    }
}

impl core::fmt::Display for PortalRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortalRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(PortalRole::Student),
            "admin" => Ok(PortalRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
