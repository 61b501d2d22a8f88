//! Wall-clock budget keeper.

use std::time::{Duration, Instant};

/// Measures elapsed time against an optional limit.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    time_limit: Option<Duration>,
}

impl Timer {
    /// Start a timer now.
    #[must_use]
    pub fn start(time_limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Time left before the limit, saturating at zero. `None` when unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.time_limit
            .map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// Whether the limit is reached. A zero limit is expired immediately.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|remaining| remaining.is_zero())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start(None)
    }
}
