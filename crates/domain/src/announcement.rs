//! Announcement: response text that is both spoken and shown to observers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable response text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Announcement(String);

impl Announcement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Announcement {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
