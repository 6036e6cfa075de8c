//! Time- and condition-based waits.
//!
//! Waiting claims nothing and blocks nothing: a wait command simply keeps
//! reporting unfinished across ticks until its condition is met. Both
//! commands run when the robot is disabled, since passing time does not
//! actuate hardware.

use std::time::Duration;

use crate::core::command::Command;
use crate::core::subsystem::SubsystemId;
use crate::util::clock::{self, Timer};

/// Finishes once a fixed duration has elapsed since initialize.
pub struct WaitCommand {
    duration: Duration,
    timer: Timer,
}

impl WaitCommand {
    /// Wait for `duration` from the moment the command is initialized.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            timer: Timer::start(),
        }
    }
}

impl Command for WaitCommand {
    fn initialize(&mut self) {
        self.timer.reset();
    }

    fn is_finished(&mut self) -> bool {
        self.timer.has_elapsed(self.duration)
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        Vec::new()
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}

enum WaitTarget {
    Predicate(Box<dyn FnMut() -> bool + Send>),
    Timestamp(Duration),
}

/// Finishes when a predicate turns true, or when the process-wide clock
/// reaches a timestamp.
pub struct WaitUntilCommand {
    target: WaitTarget,
}

impl WaitUntilCommand {
    /// Wait until the predicate reports true.
    pub fn new(predicate: impl FnMut() -> bool + Send + 'static) -> Self {
        Self {
            target: WaitTarget::Predicate(Box::new(predicate)),
        }
    }

    /// Wait until the shared monotonic clock reads at least `timestamp`.
    #[must_use]
    pub fn until_time(timestamp: Duration) -> Self {
        Self {
            target: WaitTarget::Timestamp(timestamp),
        }
    }
}

impl Command for WaitUntilCommand {
    fn is_finished(&mut self) -> bool {
        match &mut self.target {
            WaitTarget::Predicate(predicate) => predicate(),
            WaitTarget::Timestamp(timestamp) => clock::now() >= *timestamp,
        }
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        Vec::new()
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}
