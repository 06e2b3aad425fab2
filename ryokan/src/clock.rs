//! Clock abstraction for availability and tense checks.
//!
//! The availability engine compares reservation bounds against "now";
//! injecting the clock keeps those checks deterministic under test.

use chrono::{Local, NaiveDateTime};

/// The current-time collaborator.
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a fixed instant, for deterministic tests.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use ryokan::clock::{Clock, FixedClock};
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
/// let clock = FixedClock::new(date.and_time(NaiveTime::from_hms_opt(14, 59, 59).unwrap()));
/// assert_eq!(clock.now().time().to_string(), "14:59:59");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}
