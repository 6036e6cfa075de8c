//! Shared utilities: the monotonic clock, telemetry setup, and the loop
//! watchdog.

pub mod clock;
pub mod telemetry;
pub mod watchdog;

pub use clock::{now, now_ms, Timer};
pub use telemetry::init_tracing;
pub use watchdog::LoopWatchdog;
