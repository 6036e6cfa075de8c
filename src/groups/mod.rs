//! Composite commands.
//!
//! Every composite is itself a [`Command`](crate::core::Command), so
//! compositions nest to any depth. At construction a composite absorbs its direct children into the
//! [`GroupRegistry`](crate::core::GroupRegistry): from then on the
//! composite drives their whole lifecycle, and scheduling a child
//! independently (or grouping it again) is an immediate error.
//!
//! A composite's requirements are the union of its children's, and it runs
//! when disabled only if every child does — the conservative AND.

pub mod deadline;
pub mod dictator;
pub mod parallel;
pub mod perpetual;
pub mod race;
pub mod sequential;

pub use deadline::ParallelDeadlineGroup;
pub use dictator::ParallelDictatorGroup;
pub use parallel::ParallelGroup;
pub use perpetual::PerpetualCommand;
pub use race::ParallelRaceGroup;
pub use sequential::SequentialGroup;

use std::collections::HashSet;

use crate::core::command::CommandHandle;
use crate::core::error::SchedulerError;
use crate::core::subsystem::SubsystemId;

/// A child command plus its live flag, for the parallel-family groups.
#[derive(Debug)]
pub(crate) struct Member {
    pub(crate) command: CommandHandle,
    pub(crate) running: bool,
}

impl Member {
    pub(crate) fn new(command: CommandHandle) -> Self {
        Self {
            command,
            running: false,
        }
    }
}

/// Union of the children's requirements, first-seen order.
pub(crate) fn requirement_union(commands: &[CommandHandle]) -> Vec<SubsystemId> {
    let mut union = Vec::new();
    for command in commands {
        for requirement in command.requirements() {
            if !union.contains(&requirement) {
                union.push(requirement);
            }
        }
    }
    union
}

/// The conservative AND: the composite is disabled-safe only if every child
/// is.
pub(crate) fn conservative_runs_when_disabled(commands: &[CommandHandle]) -> bool {
    commands.iter().all(CommandHandle::runs_when_disabled)
}

/// Deadline/dictator groups may force-end a member mid-cycle while it still
/// claims its subsystems; shared requirements would make the claims table
/// ambiguous at that instant, so they are rejected at construction.
pub(crate) fn ensure_disjoint_requirements(
    commands: &[CommandHandle],
    kind: &str,
) -> Result<(), SchedulerError> {
    let mut seen: HashSet<SubsystemId> = HashSet::new();
    for command in commands {
        let per_command: HashSet<SubsystemId> = command.requirements().into_iter().collect();
        for requirement in per_command {
            if !seen.insert(requirement) {
                return Err(SchedulerError::GroupingViolation(format!(
                    "members of a {kind} group must have pairwise-disjoint requirements \
                     (command `{}` shares one)",
                    command.name()
                )));
            }
        }
    }
    Ok(())
}
