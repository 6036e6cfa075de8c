//! Race (first-to-finish) composition.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{conservative_runs_when_disabled, requirement_union};

/// Runs every child each tick; the group finishes as soon as any child
/// does.
///
/// No child is ended mid-race — at the group's end (natural or
/// interrupted), every child that did not finish is interrupted, and the
/// winner is ended naturally.
pub struct ParallelRaceGroup {
    commands: Vec<CommandHandle>,
    finished: bool,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl ParallelRaceGroup {
    /// Build a race group, absorbing every child into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if any child is
    /// already part of a composite.
    pub fn new(
        registry: &GroupRegistry,
        commands: Vec<CommandHandle>,
    ) -> Result<Self, SchedulerError> {
        registry.absorb(&commands)?;
        let requirements = requirement_union(&commands);
        let runs_when_disabled = conservative_runs_when_disabled(&commands);
        Ok(Self {
            commands,
            finished: false,
            requirements,
            runs_when_disabled,
        })
    }
}

impl Command for ParallelRaceGroup {
    fn initialize(&mut self) {
        self.finished = false;
        for command in &self.commands {
            command.initialize();
        }
    }

    fn execute(&mut self) {
        for command in &self.commands {
            command.execute();
            if command.is_finished() {
                self.finished = true;
            }
        }
    }

    fn end(&mut self, _interrupted: bool) {
        for command in &self.commands {
            let finished = command.is_finished();
            command.end(!finished);
        }
        self.finished = false;
    }

    fn is_finished(&mut self) -> bool {
        self.finished
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
