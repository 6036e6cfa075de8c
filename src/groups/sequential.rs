//! Sequential composition.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{conservative_runs_when_disabled, requirement_union};

/// Runs its children one after another; the group finishes when the last
/// child does.
///
/// Only the current child is live: interruption reaches it alone, and
/// requirement overlap across children is fine because they never run at
/// the same time.
pub struct SequentialGroup {
    commands: Vec<CommandHandle>,
    /// Index of the live child; `None` outside an admission.
    current: Option<usize>,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl SequentialGroup {
    /// Build a sequential group, absorbing every child into the registry.
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
            current: None,
            requirements,
            runs_when_disabled,
        })
    }
}

impl Command for SequentialGroup {
    fn initialize(&mut self) {
        self.current = Some(0);
        if let Some(first) = self.commands.first() {
            first.initialize();
        }
    }

    fn execute(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        let Some(current) = self.commands.get(index) else {
            return;
        };
        current.execute();
        if current.is_finished() {
            current.end(false);
            self.current = Some(index + 1);
            if let Some(next) = self.commands.get(index + 1) {
                next.initialize();
            }
        }
    }

    fn end(&mut self, interrupted: bool) {
        if interrupted {
            if let Some(current) = self.current.and_then(|index| self.commands.get(index)) {
                current.end(true);
            }
        }
        self.current = None;
    }

    fn is_finished(&mut self) -> bool {
        self.current == Some(self.commands.len())
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
