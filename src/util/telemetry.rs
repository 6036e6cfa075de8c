//! Telemetry helpers for structured logging and tracing.

/// Initialize tracing for a robot program. Hosts can install their own
/// subscriber; this helper installs a default env-filtered subscriber if
/// none is set, so scheduler admission/preemption logs and loop-overrun
/// warnings are visible out of the box.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
