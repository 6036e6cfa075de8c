//! Deadline composition.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{
    conservative_runs_when_disabled, ensure_disjoint_requirements, requirement_union, Member,
};

/// Runs a designated deadline command alongside other members; the group
/// finishes when the deadline command does. Members that outlive the
/// deadline are ended as interrupted.
///
/// Members (deadline included) must have pairwise-disjoint requirements:
/// a member can be force-ended mid-cycle while still claiming its
/// subsystems, and overlap would leave the claims table ambiguous at that
/// instant.
#[derive(Debug)]
pub struct ParallelDeadlineGroup {
    /// Index 0 is the deadline command.
    members: Vec<Member>,
    started: bool,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl ParallelDeadlineGroup {
    /// Build a deadline group. The disjointness check runs before any child
    /// is absorbed or touched.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if requirements
    /// overlap or any child is already part of a composite.
    pub fn new(
        registry: &GroupRegistry,
        deadline: CommandHandle,
        commands: Vec<CommandHandle>,
    ) -> Result<Self, SchedulerError> {
        let mut all = Vec::with_capacity(commands.len() + 1);
        all.push(deadline);
        all.extend(commands);
        ensure_disjoint_requirements(&all, "deadline")?;
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

    /// The command whose finish terminates the group.
    #[must_use]
    pub fn deadline(&self) -> &CommandHandle {
        &self.members[0].command
    }
}

impl Command for ParallelDeadlineGroup {
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

    fn end(&mut self, _interrupted: bool) {
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
