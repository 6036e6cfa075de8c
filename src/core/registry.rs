//! Group membership registry.
//!
//! Once a command is absorbed into a composite, the composite drives its
//! whole lifecycle; scheduling it independently, or absorbing it into a
//! second composite, would let two owners call `initialize`/`end` on the
//! same command. The registry is the membership set that makes both
//! mistakes immediate errors.
//!
//! The registry is an explicit object shared between the scheduler and
//! composite constructors (clones share state), with explicit insert and
//! [`release`](GroupRegistry::release) rather than reachability-driven
//! cleanup.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::command::{CommandHandle, CommandId};
use crate::core::error::SchedulerError;

/// Shared membership set of commands absorbed into composites.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    members: Arc<Mutex<HashSet<CommandId>>>,
}

impl GroupRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the command is currently absorbed into a composite.
    #[must_use]
    pub fn is_grouped(&self, id: CommandId) -> bool {
        self.members.lock().contains(&id)
    }

    /// Number of currently absorbed commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    /// Whether no command is currently absorbed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }

    /// Absorb every command in `children` at once.
    ///
    /// All-or-nothing: if any child is already a member, nothing is
    /// inserted and a `GroupingViolation` is returned. Composite
    /// constructors call this before touching any child.
    pub fn absorb(&self, children: &[CommandHandle]) -> Result<(), SchedulerError> {
        let mut members = self.members.lock();
        for child in children {
            if members.contains(&child.id()) {
                return Err(SchedulerError::GroupingViolation(format!(
                    "command `{}` is already part of a composite and cannot be grouped again",
                    child.name()
                )));
            }
        }
        // Passing the same handle twice in one call is the same mistake as
        // grouping it twice across calls.
        let mut seen = HashSet::with_capacity(children.len());
        for child in children {
            if !seen.insert(child.id()) {
                return Err(SchedulerError::GroupingViolation(format!(
                    "command `{}` appears twice in the same composite",
                    child.name()
                )));
            }
        }
        for child in children {
            members.insert(child.id());
        }
        Ok(())
    }

    /// Release commands from group membership for advanced reuse.
    ///
    /// The caller is responsible for no longer running the composite that
    /// absorbed them.
    pub fn release(&self, commands: &[CommandHandle]) {
        let mut members = self.members.lock();
        for command in commands {
            members.remove(&command.id());
        }
    }

    /// Drop all memberships. Intended for test teardown and full robot
    /// re-initialization.
    pub fn clear(&self) {
        self.members.lock().clear();
    }
}
