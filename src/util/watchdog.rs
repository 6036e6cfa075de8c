//! Loop-overrun watchdog.
//!
//! The control loop has a fixed period; a tick that runs longer than the
//! period starves the next one. The watchdog times each tick, records named
//! epochs at interesting points (subsystem periodics, command executes), and
//! reports overruns with the epoch breakdown. Purely observational — it
//! never alters scheduling decisions.

use std::time::Duration;

use crate::util::clock;

/// Per-tick elapsed-time tracker with named epochs.
#[derive(Debug)]
pub struct LoopWatchdog {
    budget: Duration,
    warn_on_overrun: bool,
    started_at: Duration,
    epochs: Vec<(String, Duration)>,
}

impl LoopWatchdog {
    /// Create a watchdog with the given per-tick budget.
    #[must_use]
    pub fn new(budget: Duration, warn_on_overrun: bool) -> Self {
        Self {
            budget,
            warn_on_overrun,
            started_at: clock::now(),
            epochs: Vec::new(),
        }
    }

    /// Change the per-tick budget. Keep in sync with the host loop period.
    pub fn set_budget(&mut self, budget: Duration) {
        self.budget = budget;
    }

    /// Mark the start of a tick.
    pub fn reset(&mut self) {
        self.started_at = clock::now();
        self.epochs.clear();
    }

    /// Record a named epoch at the current offset into the tick.
    pub fn epoch(&mut self, label: impl Into<String>) {
        let offset = clock::now().saturating_sub(self.started_at);
        self.epochs.push((label.into(), offset));
    }

    /// Time spent in the tick so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        clock::now().saturating_sub(self.started_at)
    }

    /// Close out the tick; logs a warning with the epoch breakdown if the
    /// budget was exceeded.
    pub fn finish(&mut self) {
        let elapsed = self.elapsed();
        if elapsed <= self.budget || !self.warn_on_overrun {
            return;
        }
        tracing::warn!(
            elapsed_us = elapsed.as_micros() as u64,
            budget_us = self.budget.as_micros() as u64,
            "scheduler loop overrun"
        );
        for (label, offset) in &self.epochs {
            tracing::warn!(offset_us = offset.as_micros() as u64, "  epoch: {label}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_are_recorded_in_order() {
        let mut watchdog = LoopWatchdog::new(Duration::from_millis(20), true);
        watchdog.reset();
        watchdog.epoch("drive.periodic()");
        watchdog.epoch("arm.periodic()");
        assert_eq!(watchdog.epochs.len(), 2);
        assert_eq!(watchdog.epochs[0].0, "drive.periodic()");
        assert!(watchdog.epochs[1].1 >= watchdog.epochs[0].1);
    }

    #[test]
    fn reset_clears_epochs() {
        let mut watchdog = LoopWatchdog::new(Duration::from_millis(20), true);
        watchdog.epoch("stale");
        watchdog.reset();
        assert!(watchdog.epochs.is_empty());
    }
}
