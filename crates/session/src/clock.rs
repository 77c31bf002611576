//! Clock implementations.

use chrono::{DateTime, Utc};

use crate::ports::ClockPort;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Manually advanced clock for testing debounce windows.
#[cfg(test)]
pub struct SteppingClock(std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(start))
    }

    pub fn advance_ms(&self, ms: i64) {
        *self.0.lock().unwrap() += chrono::Duration::milliseconds(ms);
    }
}

#[cfg(test)]
impl ClockPort for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}
