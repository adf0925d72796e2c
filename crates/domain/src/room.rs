//! Room: one of the three fixed rooms of the demo home.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A room of the home. The set is closed: rooms are never added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    Kitchen,
    Dining,
    LivingRoom,
}

impl Room {
    /// Every room, in display order.
    pub const ALL: [Self; 3] = [Self::Kitchen, Self::Dining, Self::LivingRoom];

    /// Snake-case name used in URLs and JSON keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::Dining => "dining",
            Self::LivingRoom => "living_room",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Room {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRoom(s.to_string()))
    }
}
