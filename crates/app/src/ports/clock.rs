//! Clock port: the local wall-clock time the assistant reads out.

use chrono::NaiveTime;

/// Source of the local time of day.
pub trait Clock {
    fn local_time(&self) -> NaiveTime;
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn local_time(&self) -> NaiveTime {
        (**self).local_time()
    }
}
