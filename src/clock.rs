//! Local wall-clock access.
//!
//! The current-hour lookup compares published timestamps against the
//! caller's local date and hour. Routing that through a [`Clock`] keeps the
//! lookup deterministic under test.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    /// Current local wall time.
    fn now(&self) -> NaiveDateTime;

    /// Convert an offset-bearing instant into local wall time.
    fn to_local(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime;
}

/// The process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn to_local(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }
}

/// A frozen clock in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Freeze at `local` wall time in the given offset (seconds east of UTC).
    ///
    /// Returns `None` if the offset is out of range.
    pub fn at(local: NaiveDateTime, offset_secs: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_secs)?;
        let now = local.and_local_timezone(offset).single()?;
        Some(Self { now })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.naive_local()
    }

    fn to_local(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        instant.with_timezone(self.now.offset()).naive_local()
    }
}
