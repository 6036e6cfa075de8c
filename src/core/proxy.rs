//! Detached scheduler handle and the deferred request queue.
//!
//! Event sources and schedule-proxy commands run at points where the
//! scheduler is already borrowed, so they cannot call it directly. A
//! [`SchedulerHandle`] gives them a cheap-clone endpoint that enqueues
//! schedule/cancel requests and reads a live view of the admitted set; the
//! scheduler drains the queue at fixed points of each tick, in request
//! order.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::command::{CommandHandle, CommandId};

/// One deferred request against the scheduler.
#[derive(Debug, Clone)]
pub(crate) enum PendingOp {
    /// Schedule the command with the given interruptible flag.
    Schedule(CommandHandle, bool),
    /// Cancel the command with the given identity.
    Cancel(CommandId),
}

/// State shared between the scheduler and its detached handles.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedState {
    pending: Arc<Mutex<Vec<PendingOp>>>,
    admitted: Arc<Mutex<HashSet<CommandId>>>,
}

impl SharedState {
    pub(crate) fn push(&self, op: PendingOp) {
        self.pending.lock().push(op);
    }

    /// Swap out all queued requests, leaving the queue empty.
    pub(crate) fn take_pending(&self) -> Vec<PendingOp> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub(crate) fn mark_admitted(&self, id: CommandId) {
        self.admitted.lock().insert(id);
    }

    pub(crate) fn mark_retired(&self, id: CommandId) {
        self.admitted.lock().remove(&id);
    }

    pub(crate) fn is_admitted(&self, id: CommandId) -> bool {
        self.admitted.lock().contains(&id)
    }
}

/// Cheap-clone endpoint for requesting scheduling work from outside the
/// scheduler borrow.
///
/// Requests are applied during the next drain point of `tick()`, exactly
/// once, in the order they were made. `is_scheduled` reflects commands
/// actually admitted — a request still sitting in the queue does not count.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    shared: SharedState,
}

impl SchedulerHandle {
    pub(crate) fn new(shared: SharedState) -> Self {
        Self { shared }
    }

    /// Request that `command` be scheduled with the given interruptible
    /// flag. Grouping violations surface when the request is applied, out
    /// of `tick()`.
    pub fn schedule(&self, command: &CommandHandle, interruptible: bool) {
        self.shared
            .push(PendingOp::Schedule(command.clone(), interruptible));
    }

    /// Request that `command` be canceled.
    pub fn cancel(&self, command: &CommandHandle) {
        self.shared.push(PendingOp::Cancel(command.id()));
    }

    /// Request cancellation by identity (dashboard path).
    pub fn cancel_by_id(&self, id: CommandId) {
        self.shared.push(PendingOp::Cancel(id));
    }

    /// Whether the command is currently admitted.
    #[must_use]
    pub fn is_scheduled(&self, command: &CommandHandle) -> bool {
        self.shared.is_admitted(command.id())
    }
}
