//! Perpetual wrapper.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;

/// Runs the wrapped command every tick, ignoring its finish signal.
///
/// Never finishes by itself — it retires only through external
/// interruption: explicit cancellation, preemption, or an enclosing
/// composite ending it.
pub struct PerpetualCommand {
    command: CommandHandle,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl PerpetualCommand {
    /// Wrap a command, absorbing it into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if the command is
    /// already part of a composite.
    pub fn new(registry: &GroupRegistry, command: CommandHandle) -> Result<Self, SchedulerError> {
        registry.absorb(std::slice::from_ref(&command))?;
        let requirements = command.requirements();
        let runs_when_disabled = command.runs_when_disabled();
        Ok(Self {
            command,
            requirements,
            runs_when_disabled,
        })
    }
}

impl Command for PerpetualCommand {
    fn initialize(&mut self) {
        self.command.initialize();
    }

    fn execute(&mut self) {
        self.command.execute();
    }

    fn end(&mut self, interrupted: bool) {
        self.command.end(interrupted);
    }

    fn is_finished(&mut self) -> bool {
        false
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
