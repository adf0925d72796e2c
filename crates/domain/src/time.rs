//! Time and timestamp helpers.

use chrono::{DateTime, NaiveTime, Utc};

/// UTC timestamp attached to events.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a wall-clock time the way the assistant says it: `hh:mm AM/PM`.
#[must_use]
pub fn spoken_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}
