//! One-shot log message command.

use crate::core::command::Command;
use crate::core::subsystem::SubsystemId;

/// Emits a message through `tracing` once and finishes immediately.
/// Handy as a marker inside sequential groups.
pub struct PrintCommand {
    message: String,
}

impl PrintCommand {
    /// Build with the message to log.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Command for PrintCommand {
    fn initialize(&mut self) {
        tracing::info!("{}", self.message);
    }

    fn is_finished(&mut self) -> bool {
        true
    }

    fn requirements(&self) -> Vec<SubsystemId> {
        Vec::new()
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}
