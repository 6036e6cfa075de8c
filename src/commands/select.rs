//! Key-based selection command.

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::command::{Command, CommandHandle};
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::SubsystemId;
use crate::groups::{conservative_runs_when_disabled, requirement_union};

/// Picks a command out of a key→command table when initialized and
/// delegates its lifecycle to the pick.
///
/// Every candidate is absorbed into the registry, and all candidate
/// requirements count toward the group's. A selector value with no table
/// entry logs a warning and finishes immediately.
pub struct SelectCommand<K> {
    commands: HashMap<K, CommandHandle>,
    selector: Box<dyn FnMut() -> K + Send>,
    selected: Option<CommandHandle>,
    missing_selection: bool,
    requirements: Vec<SubsystemId>,
    runs_when_disabled: bool,
}

impl<K: Eq + Hash + Send + 'static> SelectCommand<K> {
    /// Build from the candidate table and the selector.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if any candidate is
    /// already part of a composite.
    pub fn new(
        registry: &GroupRegistry,
        commands: HashMap<K, CommandHandle>,
        selector: impl FnMut() -> K + Send + 'static,
    ) -> Result<Self, SchedulerError> {
        let handles: Vec<CommandHandle> = commands.values().cloned().collect();
        registry.absorb(&handles)?;
        let requirements = requirement_union(&handles);
        let runs_when_disabled = conservative_runs_when_disabled(&handles);
        Ok(Self {
            commands,
            selector: Box::new(selector),
            selected: None,
            missing_selection: false,
            requirements,
            runs_when_disabled,
        })
    }
}

impl<K: Eq + Hash + Send + 'static> Command for SelectCommand<K> {
    fn initialize(&mut self) {
        self.missing_selection = false;
        let key = (self.selector)();
        match self.commands.get(&key) {
            Some(pick) => {
                pick.initialize();
                self.selected = Some(pick.clone());
            }
            None => {
                tracing::warn!("selector value does not correspond to any command");
                self.selected = None;
                self.missing_selection = true;
            }
        }
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
        self.missing_selection = false;
    }

    fn is_finished(&mut self) -> bool {
        if self.missing_selection {
            return true;
        }
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

    fn name(&self) -> String {
        "SelectCommand".to_string()
    }
}
