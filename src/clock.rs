//! Clock abstraction for "now" and "today"
//!
//! The logger resolves the active log file from the current calendar date,
//! so tests need a clock they can pin and advance across day boundaries.

use std::sync::RwLock;

use chrono::{DateTime, Local, NaiveDate};

/// Source of the current time for the logger
pub trait Clock: Send + Sync {
    /// Current instant in the local timezone
    fn now(&self) -> DateTime<Local>;

    /// Current calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to
///
/// Used in tests to pin "today" and to cross midnight on demand.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Local>>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, instant: DateTime<Local>) {
        if let Ok(mut now) = self.now.write() {
            *now = instant;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now
            .read()
            .map(|now| *now)
            .unwrap_or_else(|_| Local::now())
    }
}
