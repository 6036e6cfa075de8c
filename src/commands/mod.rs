//! Leaf convenience commands and composition decorators.
//!
//! Small fixed-behavior commands specified entirely by their finish
//! predicate and requirement set. None of them adds arbitration logic;
//! anything conditional or time-bounded is built by composing them with
//! the groups in [`crate::groups`].

pub mod conditional;
pub mod decorators;
pub mod functional;
pub mod instant;
pub mod print;
pub mod proxy;
pub mod select;
pub mod wait;

pub use conditional::ConditionalCommand;
pub use functional::FunctionalCommand;
pub use instant::{InstantCommand, RunCommand, StartEndCommand};
pub use print::PrintCommand;
pub use proxy::{ProxyScheduleCommand, ScheduleCommand};
pub use select::SelectCommand;
pub use wait::{WaitCommand, WaitUntilCommand};
