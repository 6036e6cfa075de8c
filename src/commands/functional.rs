//! Fully closure-defined command.

use crate::core::command::Command;
use crate::core::subsystem::SubsystemId;

/// A command whose entire lifecycle is supplied as closures — the escape
/// hatch when defining a type is more ceremony than the behavior deserves.
pub struct FunctionalCommand {
    on_init: Box<dyn FnMut() + Send>,
    on_execute: Box<dyn FnMut() + Send>,
    on_end: Box<dyn FnMut(bool) + Send>,
    is_finished: Box<dyn FnMut() -> bool + Send>,
    requirements: Vec<SubsystemId>,
}

impl FunctionalCommand {
    /// Build from the four lifecycle closures and the subsystems they
    /// touch.
    pub fn new(
        on_init: impl FnMut() + Send + 'static,
        on_execute: impl FnMut() + Send + 'static,
        on_end: impl FnMut(bool) + Send + 'static,
        is_finished: impl FnMut() -> bool + Send + 'static,
        requirements: Vec<SubsystemId>,
    ) -> Self {
        Self {
            on_init: Box::new(on_init),
            on_execute: Box::new(on_execute),
            on_end: Box::new(on_end),
            is_finished: Box::new(is_finished),
            requirements,
        }
    }
}

impl Command for FunctionalCommand {
    fn initialize(&mut self) {
        (self.on_init)();
    }

    fn execute(&mut self) {
        (self.on_execute)();
    }

    fn end(&mut self, interrupted: bool) {
        (self.on_end)(interrupted);
    }

    fn is_finished(&mut self) -> bool {
        (self.is_finished)()
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }
}
