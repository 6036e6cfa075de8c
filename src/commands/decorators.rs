//! Composition decorators on [`CommandHandle`].
//!
//! Thin sugar over the composite groups: each decorator consumes the
//! handle, wraps it into the appropriate group, and returns a new handle.
//! All grouping rules apply unchanged — the wrapped handle is absorbed and
//! can no longer be scheduled independently.

use std::time::Duration;

use crate::core::command::CommandHandle;
use crate::core::error::SchedulerError;
use crate::core::registry::GroupRegistry;
use crate::groups::{
    ParallelDeadlineGroup, ParallelGroup, ParallelRaceGroup, PerpetualCommand, SequentialGroup,
};

use super::wait::{WaitCommand, WaitUntilCommand};

impl CommandHandle {
    /// Run this command, then `next`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if either command is
    /// already part of a composite.
    pub fn and_then(
        self,
        registry: &GroupRegistry,
        next: CommandHandle,
    ) -> Result<CommandHandle, SchedulerError> {
        Ok(Self::new(SequentialGroup::new(registry, vec![self, next])?))
    }

    /// Run `before` to completion, then this command.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if either command is
    /// already part of a composite.
    pub fn before_starting(
        self,
        registry: &GroupRegistry,
        before: CommandHandle,
    ) -> Result<CommandHandle, SchedulerError> {
        Ok(Self::new(SequentialGroup::new(registry, vec![before, self])?))
    }

    /// Run this command in parallel with `others`, finishing when all have
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if any command is
    /// already part of a composite.
    pub fn along_with(
        self,
        registry: &GroupRegistry,
        others: Vec<CommandHandle>,
    ) -> Result<CommandHandle, SchedulerError> {
        let mut commands = vec![self];
        commands.extend(others);
        Ok(Self::new(ParallelGroup::new(registry, commands)?))
    }

    /// Race this command against `others`, finishing when the first does.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if any command is
    /// already part of a composite.
    pub fn race_with(
        self,
        registry: &GroupRegistry,
        others: Vec<CommandHandle>,
    ) -> Result<CommandHandle, SchedulerError> {
        let mut commands = vec![self];
        commands.extend(others);
        Ok(Self::new(ParallelRaceGroup::new(registry, commands)?))
    }

    /// Run `others` alongside this command until this command finishes —
    /// this command becomes the deadline of a deadline group.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if requirements
    /// overlap or any command is already part of a composite.
    pub fn deadline_with(
        self,
        registry: &GroupRegistry,
        others: Vec<CommandHandle>,
    ) -> Result<CommandHandle, SchedulerError> {
        Ok(Self::new(ParallelDeadlineGroup::new(registry, self, others)?))
    }

    /// Cut this command off after `timeout`: a race against a wait.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if this command is
    /// already part of a composite.
    pub fn with_timeout(
        self,
        registry: &GroupRegistry,
        timeout: Duration,
    ) -> Result<CommandHandle, SchedulerError> {
        let deadline = Self::new(WaitCommand::new(timeout));
        Ok(Self::new(ParallelRaceGroup::new(
            registry,
            vec![self, deadline],
        )?))
    }

    /// Cut this command off once `condition` turns true: a race against a
    /// condition wait.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if this command is
    /// already part of a composite.
    pub fn until(
        self,
        registry: &GroupRegistry,
        condition: impl FnMut() -> bool + Send + 'static,
    ) -> Result<CommandHandle, SchedulerError> {
        let interrupter = Self::new(WaitUntilCommand::new(condition));
        Ok(Self::new(ParallelRaceGroup::new(
            registry,
            vec![self, interrupter],
        )?))
    }

    /// Run this command forever, ignoring its finish signal.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if this command is
    /// already part of a composite.
    pub fn perpetually(self, registry: &GroupRegistry) -> Result<CommandHandle, SchedulerError> {
        Ok(Self::new(PerpetualCommand::new(registry, self)?))
    }
}
