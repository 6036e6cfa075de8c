//! Commands that schedule other commands through a detached handle.
//!
//! Targets are deliberately *not* absorbed into the registry: they are
//! scheduled independently, with their own admissions and their own
//! arbitration, exactly as if user code had scheduled them.

use crate::core::command::{Command, CommandHandle};
use crate::core::proxy::SchedulerHandle;
use crate::core::subsystem::SubsystemId;

/// Fire-and-forget: requests that the targets be scheduled, then finishes
/// immediately. The targets live on after this command retires.
pub struct ScheduleCommand {
    scheduler: SchedulerHandle,
    targets: Vec<CommandHandle>,
}

impl ScheduleCommand {
    /// Build from a detached scheduler handle and the commands to launch.
    #[must_use]
    pub fn new(scheduler: SchedulerHandle, targets: Vec<CommandHandle>) -> Self {
        Self { scheduler, targets }
    }
}

impl Command for ScheduleCommand {
    fn initialize(&mut self) {
        for target in &self.targets {
            self.scheduler.schedule(target, true);
        }
    }

    fn is_finished(&mut self) -> bool {
        true
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        Vec::new()
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}

/// Schedules the targets and stays alive until every one of them is no
/// longer scheduled; if interrupted first, cancels them.
///
/// The finish predicate is recomputed from scratch each query — all
/// targets must be out of the admitted set at the same instant.
pub struct ProxyScheduleCommand {
    scheduler: SchedulerHandle,
    targets: Vec<CommandHandle>,
}

impl ProxyScheduleCommand {
    /// Build from a detached scheduler handle and the commands to launch
    /// and watch.
    #[must_use]
    pub fn new(scheduler: SchedulerHandle, targets: Vec<CommandHandle>) -> Self {
        Self { scheduler, targets }
    }
}

impl Command for ProxyScheduleCommand {
    fn initialize(&mut self) {
        for target in &self.targets {
            self.scheduler.schedule(target, true);
        }
    }

    fn end(&mut self, interrupted: bool) {
        if interrupted {
            for target in &self.targets {
                self.scheduler.cancel(target);
            }
        }
    }

    fn is_finished(&mut self) -> bool {
        self.targets
            .iter()
            .all(|target| !self.scheduler.is_scheduled(target))
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        Vec::new()
    }
}
