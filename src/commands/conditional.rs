//! Branch-at-initialize command.

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{conservative_runs_when_disabled, requirement_union};

/// Picks one of two commands when initialized, by evaluating a predicate,
/// and delegates its whole lifecycle to the pick.
///
/// Both branches are absorbed into the registry — either may run, so both
/// requirement sets count toward the group's, and neither branch may be
/// scheduled independently.
pub struct ConditionalCommand {
    on_true: CommandHandle,
    on_false: CommandHandle,
    condition: Box<dyn FnMut() -> bool + Send>,
    selected: Option<CommandHandle>,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl ConditionalCommand {
    /// Build from the two branches and the selection predicate.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if either branch is
    /// already part of a composite.
    pub fn new(
        registry: &GroupRegistry,
        on_true: CommandHandle,
        on_false: CommandHandle,
        condition: impl FnMut() -> bool + Send + 'static,
    ) -> Result<Self, SchedulerError> {
        registry.absorb(&[on_true.clone(), on_false.clone()])?;
        let both = [on_true.clone(), on_false.clone()];
        let requirements = requirement_union(&both);
        let runs_when_disabled = conservative_runs_when_disabled(&both);
        Ok(Self {
            on_true,
            on_false,
            condition: Box::new(condition),
            selected: None,
            requirements,
            runs_when_disabled,
        })
    }
}

impl Command for ConditionalCommand {
    fn initialize(&mut self) {
        let pick = if (self.condition)() {
            self.on_true.clone()
        } else {
            self.on_false.clone()
        };
        pick.initialize();
        self.selected = Some(pick);
    }

    fn execute(&mut self) {
        if let Some(selected) = &self.selected {
            selected.execute();
        }
    }

    fn end(&mut self, interrupted: bool) {
        if let Some(selected) = self.selected.take() {
            selected.end(interrupted);
        }
    }

    fn is_finished(&mut self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(CommandHandle::is_finished)
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }

    fn runs_when_disabled(&self) -> bool {
        self.runs_when_disabled
    }
}
