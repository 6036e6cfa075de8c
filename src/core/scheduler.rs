//! The command scheduler.
//!
//! Owns the two insertion-ordered tables that define the whole system
//! state — admitted commands and subsystem claims — and runs the per-tick
//! protocol over them. Arbitration is synchronous and deterministic: the
//! same sequence of external events produces the same tick-by-tick
//! behavior, because every iteration walks a table in insertion order.
//!
//! Invariants maintained across every public operation:
//! - every claim's command is admitted and requires the claimed subsystem;
//! - an admitted command claims all of its requirements, never a subset;
//! - no subsystem is claimed by two commands at once.

use std::time::Duration;

use indexmap::IndexMap;

use crate::config::SchedulerConfig;
use crate::core::command::{CommandHandle, CommandId, CommandSummary};
use crate::core::error::SchedulerError;
use crate::core::proxy::{PendingOp, SchedulerHandle, SharedState};
use crate::core::record::CommandRecord;
use crate::core::registry::GroupRegistry;
use crate::core::subsystem::{SubsystemHandle, SubsystemId};
use crate::util::watchdog::LoopWatchdog;

type Observer = Box<dyn FnMut(&CommandHandle) + Send>;
type Binding = Box<dyn FnMut(&mut CommandScheduler) + Send>;

struct AdmittedEntry {
    handle: CommandHandle,
    record: CommandRecord,
}

struct SubsystemSlot {
    handle: SubsystemHandle,
    default_command: Option<CommandHandle>,
}

/// The central coordinator for commands and subsystems.
///
/// A robot program creates one scheduler, registers its subsystems, and
/// calls [`tick`](Self::tick) once per fixed control period. Commands are
/// admitted through [`schedule`](Self::schedule), which either claims every
/// required subsystem or — when a requirement is held — applies the
/// all-or-nothing preemption rule: every current owner must be
/// interruptible, or the admission is silently refused.
pub struct CommandScheduler {
    config: SchedulerConfig,
    registry: GroupRegistry,
    subsystems: IndexMap<SubsystemId, SubsystemSlot>,
    admitted: IndexMap<CommandId, AdmittedEntry>,
    claims: IndexMap<SubsystemId, CommandId>,
    bindings: Vec<Binding>,
    init_actions: Vec<Observer>,
    execute_actions: Vec<Observer>,
    interrupt_actions: Vec<Observer>,
    end_actions: Vec<Observer>,
    disabled: bool,
    robot_disabled: bool,
    shared: SharedState,
    watchdog: LoopWatchdog,
}

impl CommandScheduler {
    /// Create a scheduler with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        // Default config always validates.
        Self::with_config(SchedulerConfig::default()).expect("default configuration is valid")
    }

    /// Create a scheduler from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if validation fails.
    pub fn with_config(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        let watchdog = LoopWatchdog::new(config.loop_period(), config.warn_on_overrun);
        Ok(Self {
            config,
            registry: GroupRegistry::new(),
            subsystems: IndexMap::new(),
            admitted: IndexMap::new(),
            claims: IndexMap::new(),
            bindings: Vec::new(),
            init_actions: Vec::new(),
            execute_actions: Vec::new(),
            interrupt_actions: Vec::new(),
            end_actions: Vec::new(),
            disabled: false,
            robot_disabled: false,
            shared: SharedState::default(),
            watchdog,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The group registry shared with composite constructors.
    #[must_use]
    pub fn registry(&self) -> GroupRegistry {
        self.registry.clone()
    }

    /// A detached handle for requesting schedule/cancel work from event
    /// sources and schedule-proxy commands.
    #[must_use]
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle::new(self.shared.clone())
    }

    /// Change the loop period used by the overrun watchdog. Keep in sync
    /// with the host loop.
    pub fn set_loop_period(&mut self, period: Duration) {
        self.config.loop_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self.watchdog.set_budget(period);
    }

    /// Register a subsystem so its periodic hook runs every tick and its
    /// default command participates in re-arming. Registration is
    /// process-lifetime; there is no unregister. Re-registering is a no-op.
    pub fn register_subsystem(&mut self, subsystem: &SubsystemHandle) {
        self.subsystems
            .entry(subsystem.id())
            .or_insert_with(|| SubsystemSlot {
                handle: subsystem.clone(),
                default_command: None,
            });
    }

    /// Set the default command for a subsystem, registering the subsystem
    /// if needed. The default is (re-)admitted whenever no other command
    /// claims the subsystem at the end of a tick.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidDefaultCommand`] if the command
    /// does not require the subsystem or reports finished before running —
    /// default commands are expected to run until displaced.
    pub fn set_default_command(
        &mut self,
        subsystem: &SubsystemHandle,
        command: CommandHandle,
    ) -> Result<(), SchedulerError> {
        if !command.requirements().contains(&subsystem.id()) {
            return Err(SchedulerError::InvalidDefaultCommand(format!(
                "default command `{}` must require subsystem `{}`",
                command.name(),
                subsystem.name()
            )));
        }
        if command.is_finished() {
            return Err(SchedulerError::InvalidDefaultCommand(format!(
                "default command `{}` must not start finished",
                command.name()
            )));
        }
        self.register_subsystem(subsystem);
        if let Some(slot) = self.subsystems.get_mut(&subsystem.id()) {
            slot.default_command = Some(command);
        }
        Ok(())
    }

    /// The default command currently associated with a subsystem.
    #[must_use]
    pub fn default_command(&self, subsystem: &SubsystemHandle) -> Option<CommandHandle> {
        self.subsystems
            .get(&subsystem.id())
            .and_then(|slot| slot.default_command.clone())
    }

    /// Remove and return a subsystem's default command.
    pub fn clear_default_command(&mut self, subsystem: &SubsystemHandle) -> Option<CommandHandle> {
        self.subsystems
            .get_mut(&subsystem.id())
            .and_then(|slot| slot.default_command.take())
    }

    /// Add an event binding, polled once per tick before the run loop.
    /// Bindings receive the scheduler and may schedule or cancel directly.
    pub fn add_binding(&mut self, binding: impl FnMut(&mut Self) + Send + 'static) {
        self.bindings.push(Box::new(binding));
    }

    /// Remove all event bindings.
    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Observer fired whenever a command is admitted and initialized.
    pub fn on_command_initialize(&mut self, action: impl FnMut(&CommandHandle) + Send + 'static) {
        self.init_actions.push(Box::new(action));
    }

    /// Observer fired after each admitted command executes.
    pub fn on_command_execute(&mut self, action: impl FnMut(&CommandHandle) + Send + 'static) {
        self.execute_actions.push(Box::new(action));
    }

    /// Observer fired whenever a command is interrupted (any cancellation
    /// path).
    pub fn on_command_interrupt(&mut self, action: impl FnMut(&CommandHandle) + Send + 'static) {
        self.interrupt_actions.push(Box::new(action));
    }

    /// Observer fired whenever a command finishes naturally.
    pub fn on_command_finish(&mut self, action: impl FnMut(&CommandHandle) + Send + 'static) {
        self.end_actions.push(Box::new(action));
    }

    /// Schedule a command for execution.
    ///
    /// No-op if the scheduler is disabled, if the robot is in disabled mode
    /// and the command does not run when disabled, or if the command is
    /// already admitted. If any required subsystem is held, admission
    /// succeeds only when every current owner is interruptible; they are
    /// then all preempted. A single non-interruptible owner refuses the
    /// admission silently — observable via [`is_scheduled`](Self::is_scheduled).
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if the command has
    /// been absorbed into a composite.
    pub fn schedule(
        &mut self,
        command: &CommandHandle,
        interruptible: bool,
    ) -> Result<(), SchedulerError> {
        if self.registry.is_grouped(command.id()) {
            return Err(SchedulerError::GroupingViolation(format!(
                "command `{}` is part of a composite and cannot be independently scheduled",
                command.name()
            )));
        }

        if self.disabled
            || (self.robot_disabled && !command.runs_when_disabled())
            || self.admitted.contains_key(&command.id())
        {
            return Ok(());
        }

        let requirements = command.requirements();
        let mut owners: Vec<CommandId> = Vec::new();
        for requirement in &requirements {
            if let Some(owner) = self.claims.get(requirement) {
                if !owners.contains(owner) {
                    owners.push(*owner);
                }
            }
        }

        if owners.is_empty() {
            self.admit(command, interruptible, &requirements);
            return Ok(());
        }

        // All-or-nothing preemption: a single non-interruptible owner
        // vetoes the whole admission.
        for owner in &owners {
            if let Some(entry) = self.admitted.get(owner) {
                if !entry.record.interruptible() {
                    tracing::debug!(
                        command = %command.name(),
                        owner = %entry.handle.name(),
                        "admission refused: requirement held by non-interruptible command"
                    );
                    return Ok(());
                }
            }
        }
        for owner in owners {
            self.cancel_by_id(owner);
        }
        self.admit(command, interruptible, &requirements);
        Ok(())
    }

    fn admit(&mut self, command: &CommandHandle, interruptible: bool, requirements: &[SubsystemId]) {
        let id = command.id();
        self.admitted.insert(
            id,
            AdmittedEntry {
                handle: command.clone(),
                record: CommandRecord::new(interruptible),
            },
        );
        self.shared.mark_admitted(id);
        command.initialize();
        for requirement in requirements {
            self.claims.insert(*requirement, id);
        }
        for action in &mut self.init_actions {
            action(command);
        }
        tracing::debug!(command = %command.name(), interruptible, "command admitted");
    }

    /// Cancel a command. Unlike contention-triggered preemption, explicit
    /// cancellation always succeeds regardless of the interruptible flag.
    /// No-op if the command is not admitted.
    pub fn cancel(&mut self, command: &CommandHandle) {
        self.cancel_by_id(command.id());
    }

    /// Cancel by identity — the dashboard path; same semantics as
    /// [`cancel`](Self::cancel).
    pub fn cancel_by_id(&mut self, id: CommandId) {
        let Some(entry) = self.admitted.get(&id) else {
            return;
        };
        let handle = entry.handle.clone();
        handle.end(true);
        for action in &mut self.interrupt_actions {
            action(&handle);
        }
        self.admitted.shift_remove(&id);
        self.claims.retain(|_, owner| *owner != id);
        self.shared.mark_retired(id);
        tracing::debug!(command = %handle.name(), "command interrupted");
    }

    /// Cancel every admitted command, in admission order.
    pub fn cancel_all(&mut self) {
        let ids: Vec<CommandId> = self.admitted.keys().copied().collect();
        for id in ids {
            self.cancel_by_id(id);
        }
    }

    /// Run one tick of the scheduler:
    ///
    /// 1. subsystem periodic hooks, in registration order;
    /// 2. event bindings (may schedule/cancel directly);
    /// 3. deferred requests from detached handles;
    /// 4. the run loop: disabled-mode commands are interrupted, the rest
    ///    execute and finished ones retire, freeing their claims;
    /// 5. deferred requests made during the run loop;
    /// 6. default-command re-arm for unclaimed subsystems;
    /// 7. watchdog overrun check.
    ///
    /// A command finishing in a tick frees its subsystem for default
    /// re-arm in the same tick (step 6 runs after the run loop).
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::GroupingViolation`] if a deferred or
    /// default-command schedule request targets a command absorbed into a
    /// composite.
    pub fn tick(&mut self) -> Result<(), SchedulerError> {
        if self.disabled {
            return Ok(());
        }
        self.watchdog.reset();

        let subsystems: Vec<SubsystemHandle> =
            self.subsystems.values().map(|slot| slot.handle.clone()).collect();
        for subsystem in &subsystems {
            subsystem.periodic();
            self.watchdog.epoch(format!("{}.periodic()", subsystem.name()));
        }

        let mut bindings = std::mem::take(&mut self.bindings);
        for binding in &mut bindings {
            binding(self);
        }
        // Bindings registered during the poll land behind the existing ones.
        let added = std::mem::replace(&mut self.bindings, bindings);
        self.bindings.extend(added);
        self.watchdog.epoch("bindings.poll()");

        self.drain_pending()?;

        let ids: Vec<CommandId> = self.admitted.keys().copied().collect();
        for id in ids {
            let Some(entry) = self.admitted.get(&id) else {
                continue;
            };
            let handle = entry.handle.clone();

            if self.robot_disabled && !handle.runs_when_disabled() {
                // Host-environment interrupt: unconditional, ignores the
                // interruptible flag.
                self.cancel_by_id(id);
                continue;
            }

            handle.execute();
            for action in &mut self.execute_actions {
                action(&handle);
            }
            self.watchdog.epoch(format!("{}.execute()", handle.name()));

            if handle.is_finished() {
                handle.end(false);
                for action in &mut self.end_actions {
                    action(&handle);
                }
                self.admitted.shift_remove(&id);
                self.claims.retain(|_, owner| *owner != id);
                self.shared.mark_retired(id);
                self.watchdog.epoch(format!("{}.end(false)", handle.name()));
                tracing::debug!(command = %handle.name(), "command finished");
            }
        }

        self.drain_pending()?;

        let defaults: Vec<(SubsystemId, CommandHandle)> = self
            .subsystems
            .iter()
            .filter_map(|(id, slot)| slot.default_command.clone().map(|command| (*id, command)))
            .collect();
        for (subsystem_id, command) in defaults {
            if !self.claims.contains_key(&subsystem_id) {
                self.schedule(&command, true)?;
            }
        }

        self.watchdog.finish();
        Ok(())
    }

    /// Apply queued requests from detached handles until the queue is
    /// empty. Applying a request can enqueue more (a schedule-proxy
    /// command's `initialize` schedules its targets), so this loops; it
    /// terminates because re-scheduling an admitted command is a no-op.
    fn drain_pending(&mut self) -> Result<(), SchedulerError> {
        loop {
            let ops = self.shared.take_pending();
            if ops.is_empty() {
                return Ok(());
            }
            for op in ops {
                match op {
                    PendingOp::Schedule(command, interruptible) => {
                        self.schedule(&command, interruptible)?;
                    }
                    PendingOp::Cancel(id) => self.cancel_by_id(id),
                }
            }
        }
    }

    /// Whether the command is currently admitted. This only reflects
    /// commands scheduled directly — children inside composites are
    /// invisible to the scheduler.
    #[must_use]
    pub fn is_scheduled(&self, command: &CommandHandle) -> bool {
        self.admitted.contains_key(&command.id())
    }

    /// Elapsed time since the command was admitted, or `None` if it is not
    /// currently admitted.
    #[must_use]
    pub fn time_since_admitted(&self, command: &CommandHandle) -> Option<Duration> {
        self.admitted
            .get(&command.id())
            .map(|entry| entry.record.time_since_admitted())
    }

    /// The command currently claiming a subsystem, if any.
    #[must_use]
    pub fn requiring(&self, subsystem: &SubsystemHandle) -> Option<CommandHandle> {
        self.claims
            .get(&subsystem.id())
            .and_then(|id| self.admitted.get(id))
            .map(|entry| entry.handle.clone())
    }

    /// Serializable snapshot of every admitted command, in admission
    /// order — the dashboard enumeration surface.
    #[must_use]
    pub fn admitted_summaries(&self) -> Vec<CommandSummary> {
        self.admitted
            .values()
            .map(|entry| CommandSummary {
                id: entry.handle.id(),
                name: entry.handle.name().to_string(),
            })
            .collect()
    }

    /// Disable the scheduler: `tick` and `schedule` become no-ops until
    /// [`enable`](Self::enable). Admitted commands are left in place.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Re-enable a disabled scheduler.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Supply the host robot mode. While disabled, commands that do not
    /// run-when-disabled are refused at admission and interrupted in the
    /// run loop.
    pub fn set_robot_disabled(&mut self, disabled: bool) {
        self.robot_disabled = disabled;
    }
}

impl Default for CommandScheduler {
    fn default() -> Self {
        Self::new()
    }
}
