//! Adapter lifecycle status.

use super::ParseAdapterStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status reported by an adapter when it registers.
///
/// The value is descriptive only. Any status may replace any other on a
/// subsequent registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterStatus {
    /// The adapter is producing data.
    #[default]
    Active,
    /// The adapter is registered but idle.
    Inactive,
    /// The adapter reported a fault.
    Error,
    /// The adapter is temporarily down for maintenance.
    Maintenance,
}

impl AdapterStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Error => "error",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterStatus {
    type Err = ParseAdapterStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "error" => Ok(Self::Error),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParseAdapterStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<&str> for AdapterStatus {
    type Error = ParseAdapterStatusError;

    fn try_from(value: &str) -> Result<Self, ParseAdapterStatusError> {
        value.parse()
    }
}
