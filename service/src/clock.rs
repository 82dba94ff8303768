//! Local wall clock.
//!
//! The controller only knows monotonic instants; the schedule refresher
//! uses this clock to tell it which second of the day "now" is. Times are
//! resolved in a named time zone, so daylight saving changes are followed.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Wall clock in a fixed time zone
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    zone: Tz,
}

impl WallClock {
    pub const fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Current local time
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }

    /// Seconds since local midnight
    pub fn second_of_day(&self) -> f64 {
        second_of_day(&self.now())
    }

    /// Today's local date
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Local time of day for a UTC instant, in whole seconds
    pub fn local_second_of_day(&self, at: DateTime<Utc>) -> u32 {
        at.with_timezone(&self.zone).num_seconds_from_midnight()
    }
}

/// Wall-clock seconds since midnight, with sub-second precision
pub fn second_of_day<Z: TimeZone>(at: &DateTime<Z>) -> f64 {
    f64::from(at.num_seconds_from_midnight()) + f64::from(at.nanosecond() % 1_000_000_000) / 1e9
}
