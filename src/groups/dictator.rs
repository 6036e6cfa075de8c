//! Dictator composition.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{
    conservative_runs_when_disabled, ensure_disjoint_requirements, requirement_union, Member,
};

/// Runs a designated dictator command alongside other members; the group
/// lives exactly as long as the dictator. Whether the group ends because
/// the dictator finished or because the group itself was interrupted,
/// every still-running member is interrupted with it.
///
/// Same disjointness rule as [`ParallelDeadlineGroup`](crate::groups::ParallelDeadlineGroup):
/// members (dictator included) must not share requirements, since a member
/// can be force-ended mid-cycle while still holding its claims.
#[derive(Debug)]
pub struct ParallelDictatorGroup {
    /// Index 0 is the dictator command.
    members: Vec<Member>,
    started: bool,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl ParallelDictatorGroup {
    /// Build a dictator group. The disjointness check runs before any child
    /// is absorbed or touched.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if requirements
    /// overlap or any child is already part of a composite.
    pub fn new(
        registry: &GroupRegistry,
        dictator: CommandHandle,
        commands: Vec<CommandHandle>,
    ) -> Result<Self, SchedulerError> {
        let mut all = Vec::with_capacity(commands.len() + 1);
        all.push(dictator);
        all.extend(commands);
        ensure_disjoint_requirements(&all, "dictator")?;
        registry.absorb(&all)?;
        let requirements = requirement_union(&all);
        let runs_when_disabled = conservative_runs_when_disabled(&all);
        Ok(Self {
            members: all.into_iter().map(Member::new).collect(),
            started: false,
            requirements,
            runs_when_disabled,
        })
    }

    /// The command that dictates the group's lifetime.
    #[must_use]
    pub fn dictator(&self) -> &CommandHandle {
        &self.members[0].command
    }
}

impl Command for ParallelDictatorGroup {
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
            tracing::debug!(
                dictator = %self.members[0].command.name(),
                "dictator group interrupted; ending still-running members"
            );
        }
        for member in &mut self.members {
            if member.running {
                member.command.end(true);
            }
            member.running = false;
        }
    }

    fn is_finished(&mut self) -> bool {
        self.started && !self.members[0].running
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
