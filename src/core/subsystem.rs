//! Exclusive hardware resources and their shared handles.
//!
//! A subsystem models one exclusive piece of hardware (a drivetrain, an
//! arm). At most one admitted command claims a subsystem at any instant;
//! the scheduler enforces that invariant. Subsystems register with the
//! scheduler once, at the construction site of user code, and stay
//! registered for the life of the process.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a subsystem, assigned once at handle creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubsystemId(Uuid);

impl SubsystemId {
    pub(crate) fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An exclusive-access hardware abstraction.
///
/// `periodic` runs once per tick, before any command executes — the place
/// for sensor reads and state estimation that commands consume in the same
/// cycle.
pub trait Subsystem: Send {
    /// Per-tick hook, called in registration order at the top of each tick.
    fn periodic(&mut self) {}

    /// Human-readable name for log lines and the watchdog epochs.
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}

/// Shared, identity-keyed handle to a subsystem.
#[derive(Clone)]
pub struct SubsystemHandle {
    id: SubsystemId,
    name: Arc<str>,
    inner: Arc<Mutex<Box<dyn Subsystem>>>,
}

impl SubsystemHandle {
    /// Wrap a subsystem into a shared handle, fixing its identity and name.
    #[must_use]
    pub fn new(subsystem: impl Subsystem + 'static) -> Self {
        let name: Arc<str> = Arc::from(subsystem.name().as_str());
        let boxed: Box<dyn Subsystem> = Box::new(subsystem);
        Self {
            id: SubsystemId::allocate(),
            name,
            inner: Arc::new(Mutex::new(boxed)),
        }
    }

    /// The subsystem's stable identity, used in command requirement sets.
    #[must_use]
    pub fn id(&self) -> SubsystemId {
        self.id
    }

    /// The subsystem's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward `periodic` to the underlying subsystem.
    ///
    /// Normally invoked only by the scheduler at the top of each tick.
    pub fn periodic(&self) {
        self.inner.lock().periodic();
    }
}

impl fmt::Debug for SubsystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsystemHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SubsystemHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SubsystemHandle {}

impl std::hash::Hash for SubsystemHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
