//! Tests for error types

use commandeer::core::SchedulerError;

#[test]
fn test_grouping_violation_error() {
    let err = SchedulerError::GroupingViolation("command `Drive` is grouped".to_string());
    assert_eq!(
        format!("{err}"),
        "grouping violation: command `Drive` is grouped"
    );
}

#[test]
fn test_invalid_default_command_error() {
    let err = SchedulerError::InvalidDefaultCommand("must require subsystem".to_string());
    assert_eq!(
        format!("{err}"),
        "invalid default command: must require subsystem"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("loop_period_ms must be greater than 0".to_string());
    assert_eq!(
        format!("{err}"),
        "invalid configuration: loop_period_ms must be greater than 0"
    );
}
