//! Tests for utility functions

use std::time::Duration;

use commandeer::util::clock::{self, Timer};
use commandeer::util::telemetry::init_tracing;
use commandeer::util::watchdog::LoopWatchdog;

#[test]
fn test_clock_now_is_monotonic() {
    let a = clock::now();
    let b = clock::now();
    assert!(b >= a);
}

#[test]
fn test_clock_now_ms_matches_now() {
    let ms = clock::now_ms();
    let later = clock::now().as_millis();
    assert!(later >= ms);
}

#[test]
fn test_timer_measures_from_reset() {
    let mut timer = Timer::start();
    timer.reset();
    assert!(timer.has_elapsed(Duration::ZERO));
    assert!(!timer.has_elapsed(Duration::from_secs(3600)));
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

#[test]
fn test_watchdog_within_budget_stays_quiet() {
    let mut watchdog = LoopWatchdog::new(Duration::from_secs(3600), true);
    watchdog.reset();
    watchdog.epoch("drive.periodic()");
    watchdog.finish();
    assert!(watchdog.elapsed() < Duration::from_secs(3600));
}

#[test]
fn test_watchdog_overrun_does_not_panic() {
    let mut watchdog = LoopWatchdog::new(Duration::ZERO, true);
    watchdog.reset();
    watchdog.epoch("arm.execute()");
    // Zero budget: always an overrun; only the warning path runs.
    watchdog.finish();
}
