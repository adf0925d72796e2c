//! Listening status: the phases of one capture/transcribe cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current phase of the listening loop.
///
/// ```text
/// idle ──► listening ──► processing ──► idle
///              │                          ▲
///              └──────────────────────────┘  (timeout / capture error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListeningStatus {
    #[default]
    Idle,
    Listening,
    Processing,
}

impl ListeningStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Listening)
                | (Self::Listening, Self::Processing | Self::Idle)
                | (Self::Processing, Self::Idle)
        )
    }
}

impl fmt::Display for ListeningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Listening => f.write_str("listening"),
            Self::Processing => f.write_str("processing"),
        }
    }
}
