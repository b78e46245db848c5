//! Clock port for reading the current time

use fancyclock_types::Timestamp;
use std::cell::Cell;

/// Source of the current Timestamp.
///
/// Reads are treated as infallible.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn set(&self, ts: Timestamp) {
        self.current.set(ts);
    }

    /// Move the clock forward by `millis` milliseconds.
    pub fn advance(&self, millis: i64) {
        let next = *self.current.get().as_datetime() + chrono::Duration::milliseconds(millis);
        self.current.set(Timestamp::from_datetime(next));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.current.get()
    }
}
