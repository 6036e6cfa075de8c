//! Process-wide monotonic clock.
//!
//! All scheduler timestamps (admission times, watchdog epochs, wait
//! commands) are drawn from a single monotonic epoch fixed at first use, so
//! durations are comparable across every component in the process.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Time elapsed since the process-wide clock epoch.
///
/// The epoch is pinned by the first call in the process; the value is
/// monotonic and never affected by wall-clock adjustments.
pub fn now() -> Duration {
    EPOCH.get_or_init(Instant::now).elapsed()
}

/// Current monotonic time in milliseconds since the clock epoch.
pub fn now_ms() -> u128 {
    now().as_millis()
}

/// A restartable stopwatch over the shared monotonic clock.
///
/// Used by duration-based commands: reset on `initialize`, polled by
/// `is_finished`.
#[derive(Debug, Clone)]
pub struct Timer {
    started_at: Duration,
}

impl Timer {
    /// Start a new timer at the current clock reading.
    #[must_use]
    pub fn start() -> Self {
        Self { started_at: now() }
    }

    /// Restart the timer at the current clock reading.
    pub fn reset(&mut self) {
        self.started_at = now();
    }

    /// Time elapsed since the timer was last started or reset.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        now().saturating_sub(self.started_at)
    }

    /// Whether at least `duration` has elapsed since the last reset.
    #[must_use]
    pub fn has_elapsed(&self, duration: Duration) -> bool {
        self.elapsed() >= duration
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn timer_zero_duration_elapses_immediately() {
        let timer = Timer::start();
        assert!(timer.has_elapsed(Duration::ZERO));
    }

    #[test]
    fn timer_long_duration_has_not_elapsed() {
        let timer = Timer::start();
        assert!(!timer.has_elapsed(Duration::from_secs(3600)));
    }

    #[test]
    fn timer_reset_restarts_measurement() {
        let mut timer = Timer::start();
        timer.reset();
        assert!(!timer.has_elapsed(Duration::from_secs(3600)));
    }
}
