//! Tests for configuration validation

use std::time::Duration;

use commandeer::config::SchedulerConfig;

#[test]
fn test_default_config_is_valid() {
    let cfg = SchedulerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.loop_period(), Duration::from_millis(20));
}

#[test]
fn test_zero_loop_period_is_invalid() {
    let cfg = SchedulerConfig {
        loop_period_ms: 0,
        warn_on_overrun: true,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_str_valid() {
    let cfg =
        SchedulerConfig::from_json_str(r#"{"loop_period_ms": 10, "warn_on_overrun": false}"#)
            .unwrap();
    assert_eq!(cfg.loop_period_ms, 10);
    assert!(!cfg.warn_on_overrun);
}

#[test]
fn test_from_json_str_rejects_invalid_values() {
    let err =
        SchedulerConfig::from_json_str(r#"{"loop_period_ms": 0, "warn_on_overrun": true}"#)
            .unwrap_err();
    assert!(err.contains("loop_period_ms"));
}

#[test]
fn test_from_json_str_rejects_malformed_input() {
    let err = SchedulerConfig::from_json_str("not json").unwrap_err();
    assert!(err.contains("parse error"));
}

#[test]
fn test_config_round_trips_through_json() {
    let cfg = SchedulerConfig {
        loop_period_ms: 50,
        warn_on_overrun: false,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back = SchedulerConfig::from_json_str(&json).unwrap();
    assert_eq!(back.loop_period_ms, 50);
    assert!(!back.warn_on_overrun);
}
