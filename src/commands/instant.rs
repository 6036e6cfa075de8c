//! Closure-backed leaf commands: run-once, run-forever, start/end.

use crate::core::command::Command;
use crate::core::subsystem::SubsystemId;

type Action = Box<dyn FnMut() + Send>;

/// Runs a closure once at initialize and finishes immediately.
pub struct InstantCommand {
    action: Action,
    requirements: Vec<SubsystemId>,
}

impl InstantCommand {
    /// Build from an action and the subsystems it touches.
    pub fn new(action: impl FnMut() + Send + 'static, requirements: Vec<SubsystemId>) -> Self {
        Self {
            action: Box::new(action),
            requirements,
        }
    }
}

impl Command for InstantCommand {
    fn initialize(&mut self) {
        (self.action)();
    }

    fn is_finished(&mut self) -> bool {
        true
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }
}

/// Runs a closure every tick and never finishes by itself.
///
/// The usual shape for a default command: it runs until displaced by a
/// command that claims the same subsystem.
pub struct RunCommand {
    action: Action,
    requirements: Vec<SubsystemId>,
}

impl RunCommand {
    /// Build from a per-tick action and the subsystems it touches.
    pub fn new(action: impl FnMut() + Send + 'static, requirements: Vec<SubsystemId>) -> Self {
        Self {
            action: Box::new(action),
            requirements,
        }
    }
}

impl Command for RunCommand {
    fn execute(&mut self) {
        (self.action)();
    }

    fn is_finished(&mut self) -> bool {
        false
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }
}

/// Runs one closure at initialize and another at end, idling in between.
/// Never finishes by itself.
pub struct StartEndCommand {
    on_start: Action,
    on_end: Action,
    requirements: Vec<SubsystemId>,
}

impl StartEndCommand {
    /// Build from start/end actions and the subsystems they touch.
    pub fn new(
        on_start: impl FnMut() + Send + 'static,
        on_end: impl FnMut() + Send + 'static,
        requirements: Vec<SubsystemId>,
    ) -> Self {
        Self {
            on_start: Box::new(on_start),
            on_end: Box::new(on_end),
            requirements,
        }
    }
}

impl Command for StartEndCommand {
    fn initialize(&mut self) {
        (self.on_start)();
    }

    fn end(&mut self, _interrupted: bool) {
        (self.on_end)();
    }

    fn is_finished(&mut self) -> bool {
        false
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        self.requirements.clone()
    }
}
