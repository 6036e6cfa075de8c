//! The command capability and its shared handle.
//!
//! A command is a unit of robot behavior with an admit/run/retire lifecycle
//! and a declared set of exclusive subsystem requirements. The scheduler and
//! the composite groups never own commands; they hold [`CommandHandle`]s,
//! cheap clones of a shared, identity-keyed reference. The [`CommandId`]
//! inside the handle is the key used across the admitted table, the claims
//! table, the group registry, and cancellation calls.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::subsystem::SubsystemId;

/// Stable identity of a command, assigned once at handle creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandId(Uuid);

impl CommandId {
    pub(crate) fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A unit of robot behavior scheduled once per control cycle.
///
/// `is_finished` and `requirements` are required; the lifecycle hooks
/// default to no-ops so trivial commands stay trivial. `execute` must
/// return within the tick — a command that needs to wait keeps returning
/// `false` from `is_finished` across ticks instead of blocking.
pub trait Command: Send {
    /// Called once when the command is admitted, and again on every restart
    /// inside a composite.
    fn initialize(&mut self) {}

    /// Called once per tick while the command is admitted.
    fn execute(&mut self) {}

    /// Called exactly once per admission when the command retires.
    /// `interrupted` is true on every cancellation path (explicit cancel,
    /// preemption, disabled-mode interruption, composite interrupt).
    fn end(&mut self, interrupted: bool) {
        let _ = interrupted;
    }

    /// Whether the command has finished its work this admission.
    fn is_finished(&mut self) -> bool;

    /// The subsystems this command claims exclusively while admitted.
    fn requirements(&self) -> Vec<SubsystemId>;

    /// Whether the command may run while the robot is in disabled mode.
    fn runs_when_disabled(&self) -> bool {
        false
    }

    /// Human-readable name for dashboards and log lines.
    fn name(&self) -> String {
        short_type_name::<Self>()
    }
}

/// Last path segment of a type name, e.g. `SequentialGroup`.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// Shared, identity-keyed handle to a command.
///
/// Clones are cheap and all refer to the same underlying command; equality
/// and hashing use the [`CommandId`] only. Caller code keeps its own clone
/// while the scheduler or a composite holds others.
#[derive(Clone)]
pub struct CommandHandle {
    id: CommandId,
    name: Arc<str>,
    inner: Arc<Mutex<Box<dyn Command>>>,
}

impl CommandHandle {
    /// Wrap a command into a shared handle, fixing its identity and name.
    #[must_use]
    pub fn new(command: impl Command + 'static) -> Self {
        let name: Arc<str> = Arc::from(command.name().as_str());
        let boxed: Box<dyn Command> = Box::new(command);
        Self {
            id: CommandId::allocate(),
            name,
            inner: Arc::new(Mutex::new(boxed)),
        }
    }

    /// The command's stable identity.
    #[must_use]
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// The command's display name, captured at handle creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward `initialize` to the underlying command.
    ///
    /// Normally invoked only by the scheduler and by composite groups.
    pub fn initialize(&self) {
        self.inner.lock().initialize();
    }

    /// Forward `execute` to the underlying command.
    pub fn execute(&self) {
        self.inner.lock().execute();
    }

    /// Forward `end` to the underlying command.
    pub fn end(&self, interrupted: bool) {
        self.inner.lock().end(interrupted);
    }

    /// Query the underlying command's finish predicate.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.lock().is_finished()
    }

    /// The underlying command's declared requirements.
    #[must_use]
    pub fn requirements(&self) -> Vec<SubsystemId> {
        self.inner.lock().requirements()
    }

    /// Whether the underlying command may run in disabled mode.
    #[must_use]
    pub fn runs_when_disabled(&self) -> bool {
        self.inner.lock().runs_when_disabled()
    }
}

impl fmt::Debug for CommandHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CommandHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CommandHandle {}

impl std::hash::Hash for CommandHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Serializable snapshot of an admitted command, for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSummary {
    /// Identity usable with `cancel_by_id`.
    pub id: CommandId,
    /// Display name.
    pub name: String,
}
