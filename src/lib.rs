//! # Commandeer
//!
//! A cooperative command scheduler and composition algebra for cyclic
//! robot control loops.
//!
//! Robot behavior is expressed as discrete units of work ("commands") that
//! declare which exclusive hardware resources ("subsystems") they need.
//! Once per fixed control period — typically tens of milliseconds — the
//! scheduler admits, runs, preempts, and retires commands, guaranteeing
//! that no two commands ever hold the same subsystem at the same time.
//!
//! ## Core Problem Solved
//!
//! A robot control loop is a concurrency-shaped problem solved without
//! concurrency: many behaviors compete for exclusive hardware, but
//! everything must resolve synchronously and deterministically inside one
//! tick so the robot behaves identically run after run.
//!
//! - **Exclusive claims**: at most one command owns a subsystem at a time
//! - **All-or-nothing preemption**: a new command displaces the current
//!   owners of its requirements only if every one of them is interruptible
//! - **Deterministic iteration**: every table preserves insertion order,
//!   so identical inputs produce identical tick-by-tick behavior
//! - **Composition algebra**: sequential, parallel, race, deadline,
//!   dictator, and perpetual groups nest arbitrarily while preserving the
//!   resource-safety invariant
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use commandeer::core::{CommandHandle, CommandScheduler, SubsystemHandle};
//! use commandeer::commands::RunCommand;
//!
//! let mut scheduler = CommandScheduler::new();
//! let drivetrain = SubsystemHandle::new(Drivetrain::new());
//! scheduler.register_subsystem(&drivetrain);
//!
//! let drive = CommandHandle::new(RunCommand::new(
//!     move || { /* arcade drive */ },
//!     vec![drivetrain.id()],
//! ));
//! scheduler.set_default_command(&drivetrain, drive)?;
//!
//! // host loop, once per control period:
//! scheduler.tick()?;
//! ```
//!
//! ## Composition
//!
//! ```rust,ignore
//! use commandeer::groups::SequentialGroup;
//!
//! let registry = scheduler.registry();
//! let auto = CommandHandle::new(SequentialGroup::new(&registry, vec![
//!     lower_intake,
//!     drive_forward.with_timeout(&registry, Duration::from_secs(3))?,
//!     shoot,
//! ])?);
//! scheduler.schedule(&auto, true)?;
//! ```
//!
//! For complete examples, see the integration tests in `tests/`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: commands, subsystems, the scheduler, and
/// the grouping registry.
pub mod core;
/// Configuration models for the scheduler and loop watchdog.
pub mod config;
/// Composite commands: sequential, parallel, race, deadline, dictator,
/// perpetual.
pub mod groups;
/// Leaf convenience commands and composition decorators.
pub mod commands;
/// Shared utilities: monotonic clock, telemetry setup, loop watchdog.
pub mod util;
