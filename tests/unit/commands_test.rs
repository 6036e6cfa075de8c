//! Tests for the leaf convenience commands

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use commandeer::commands::{
    ConditionalCommand, FunctionalCommand, InstantCommand, PrintCommand, RunCommand,
    SelectCommand, StartEndCommand, WaitCommand, WaitUntilCommand,
};
use commandeer::core::{Command, CommandHandle, GroupRegistry};
use commandeer::util::clock;

#[test]
fn test_instant_command_runs_once_and_finishes() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let mut cmd = InstantCommand::new(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        Vec::new(),
    );
    cmd.initialize();
    assert!(cmd.is_finished());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_run_command_never_finishes() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let mut cmd = RunCommand::new(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        Vec::new(),
    );
    cmd.initialize();
    cmd.execute();
    cmd.execute();
    assert!(!cmd.is_finished());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_start_end_command_brackets_its_admission() {
    let started = Arc::new(AtomicBool::new(false));
    let ended = Arc::new(AtomicBool::new(false));
    let start_flag = Arc::clone(&started);
    let end_flag = Arc::clone(&ended);
    let mut cmd = StartEndCommand::new(
        move || start_flag.store(true, Ordering::SeqCst),
        move || end_flag.store(true, Ordering::SeqCst),
        Vec::new(),
    );
    cmd.initialize();
    assert!(started.load(Ordering::SeqCst));
    assert!(!cmd.is_finished());
    cmd.end(true);
    assert!(ended.load(Ordering::SeqCst));
}

#[test]
fn test_functional_command_wires_all_four_closures() {
    let trace = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let t1 = Arc::clone(&trace);
    let t2 = Arc::clone(&trace);
    let t3 = Arc::clone(&trace);
    let done = Arc::new(AtomicBool::new(false));
    let done_query = Arc::clone(&done);
    let mut cmd = FunctionalCommand::new(
        move || t1.lock().push("init"),
        move || t2.lock().push("exec"),
        move |interrupted| t3.lock().push(if interrupted { "end(true)" } else { "end(false)" }),
        move || done_query.load(Ordering::SeqCst),
        Vec::new(),
    );
    cmd.initialize();
    cmd.execute();
    assert!(!cmd.is_finished());
    done.store(true, Ordering::SeqCst);
    assert!(cmd.is_finished());
    cmd.end(false);
    assert_eq!(*trace.lock(), ["init", "exec", "end(false)"]);
}

#[test]
fn test_wait_command_zero_duration_finishes_immediately() {
    let mut cmd = WaitCommand::new(Duration::ZERO);
    cmd.initialize();
    assert!(cmd.is_finished());
    assert!(cmd.runs_when_disabled());
}

#[test]
fn test_wait_command_long_duration_keeps_waiting() {
    let mut cmd = WaitCommand::new(Duration::from_secs(3600));
    cmd.initialize();
    assert!(!cmd.is_finished());
}

#[test]
fn test_wait_until_predicate() {
    let flag = Arc::new(AtomicBool::new(false));
    let query = Arc::clone(&flag);
    let mut cmd = WaitUntilCommand::new(move || query.load(Ordering::SeqCst));
    assert!(!cmd.is_finished());
    flag.store(true, Ordering::SeqCst);
    assert!(cmd.is_finished());
}

#[test]
fn test_wait_until_timestamp() {
    let mut past = WaitUntilCommand::until_time(clock::now());
    assert!(past.is_finished());
    let mut future = WaitUntilCommand::until_time(clock::now() + Duration::from_secs(3600));
    assert!(!future.is_finished());
}

#[test]
fn test_print_command_finishes_immediately() {
    let mut cmd = PrintCommand::new("auto sequence armed");
    cmd.initialize();
    assert!(cmd.is_finished());
    assert!(cmd.runs_when_disabled());
}

#[test]
fn test_conditional_command_picks_by_predicate() {
    let registry = GroupRegistry::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let on_true_hits = Arc::clone(&hits);
    let on_true = CommandHandle::new(InstantCommand::new(
        move || {
            on_true_hits.fetch_add(1, Ordering::SeqCst);
        },
        Vec::new(),
    ));
    let on_false = CommandHandle::new(InstantCommand::new(|| {}, Vec::new()));
    let mut cmd =
        ConditionalCommand::new(&registry, on_true.clone(), on_false.clone(), || true).unwrap();

    cmd.initialize();
    assert!(cmd.is_finished());
    cmd.end(false);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Both branches are absorbed either way.
    assert!(registry.is_grouped(on_true.id()));
    assert!(registry.is_grouped(on_false.id()));
}

#[test]
fn test_select_command_picks_by_key() {
    let registry = GroupRegistry::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let chosen_hits = Arc::clone(&hits);
    let mut table = HashMap::new();
    table.insert(
        "shoot",
        CommandHandle::new(InstantCommand::new(
            move || {
                chosen_hits.fetch_add(1, Ordering::SeqCst);
            },
            Vec::new(),
        )),
    );
    table.insert("idle", CommandHandle::new(InstantCommand::new(|| {}, Vec::new())));

    let mut cmd = SelectCommand::new(&registry, table, || "shoot").unwrap();
    cmd.initialize();
    assert!(cmd.is_finished());
    cmd.end(false);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_select_command_with_unknown_key_finishes_immediately() {
    let registry = GroupRegistry::new();
    let mut table = HashMap::new();
    table.insert(1, CommandHandle::new(InstantCommand::new(|| {}, Vec::new())));

    let mut cmd = SelectCommand::new(&registry, table, || 99).unwrap();
    cmd.initialize();
    assert!(cmd.is_finished());
}
