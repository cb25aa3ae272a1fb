//! Round countdown timer

use std::time::Instant;

/// Wall-clock countdown measured on the monotonic clock
#[derive(Debug, Clone)]
pub struct RoundTimer {
    duration_seconds: f64,
    start: Instant,
}

impl RoundTimer {
    /// Start a countdown of `duration_seconds` from now
    #[must_use]
    pub fn new(duration_seconds: f64) -> Self {
        Self::started_at(duration_seconds, Instant::now())
    }

    /// Countdown that began at `start`, which may lie in the past
    #[must_use]
    pub const fn started_at(duration_seconds: f64, start: Instant) -> Self {
        Self {
            duration_seconds,
            start,
        }
    }

    /// Restart the countdown from now
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Seconds left; negative once the countdown has run out
    #[must_use]
    pub fn remaining_seconds(&self) -> f64 {
        self.duration_seconds - self.elapsed_seconds()
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.elapsed_seconds() >= self.duration_seconds
    }
}
