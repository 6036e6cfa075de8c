//! Parallel (wait-for-all) composition.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{conservative_runs_when_disabled, requirement_union, Member};

/// Runs every child each tick; the group finishes once all children have
/// finished. Children that finish early are ended naturally and sit out
/// the rest of the group.
#[derive(Debug)]
pub struct ParallelGroup {
    members: Vec<Member>,
    /// False until the first `initialize`; a never-started group is not
    /// finished.
    started: bool,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl ParallelGroup {
    /// Build a parallel group, absorbing every child into the registry.
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
            members: commands.into_iter().map(Member::new).collect(),
            started: false,
            requirements,
            runs_when_disabled,
        })
    }
}

impl Command for ParallelGroup {
    fn initialize(&mut self) {
        self.started = true;
        for member in &mut self.members {
            member.running = true;
            member.command.initialize();
        }
    }

    fn execute(&mut self) {
        for member in &mut self.members {
            if !member.running {
                continue;
            }
            member.command.execute();
            if member.command.is_finished() {
                member.command.end(false);
                member.running = false;
            }
        }
    }

    fn end(&mut self, interrupted: bool) {
        if interrupted {
            for member in &mut self.members {
                if member.running {
                    member.command.end(true);
                }
            }
        }
        for member in &mut self.members {
            member.running = false;
        }
    }

    fn is_finished(&mut self) -> bool {
        self.started && self.members.iter().all(|member| !member.running)
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
