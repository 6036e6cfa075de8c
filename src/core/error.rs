//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by the scheduler and the composition layer.
///
/// Arbitration outcomes are never errors: a refused admission (a needed
/// subsystem is held by a non-interruptible command) and the various no-ops
/// (re-scheduling an admitted command, canceling a command that is not
/// admitted) are defined results, observable through `is_scheduled`. Only
/// misuse of the grouping and configuration contracts surfaces here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The grouping contract was violated: scheduling a command that has
    /// been absorbed into a composite, absorbing a command into a second
    /// composite, or building a deadline/dictator group whose members share
    /// a requirement.
    #[error("grouping violation: {0}")]
    GroupingViolation(String),
    /// A default command failed validation for its subsystem.
    #[error("invalid default command: {0}")]
    InvalidDefaultCommand(String),
    /// Scheduler configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
