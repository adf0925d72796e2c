//! Local wall clock.

use chrono::{Local, NaiveTime};
use voicehome_app::ports::Clock;

/// Reads the machine's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}
