//! "Today" providers for day-granular metrics.

use crate::model::day::DayKey;

pub trait Clock {
    fn today(&self) -> DayKey;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        chrono::Local::now().date_naive()
    }
}

/// Pinned date, for tests and replayable runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DayKey);

impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        self.0
    }
}
