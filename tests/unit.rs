//! Unit tests for individual components

#[path = "unit/commands_test.rs"]
mod commands_test;
#[path = "unit/config_test.rs"]
mod config_test;
#[path = "unit/error_test.rs"]
mod error_test;
#[path = "unit/util_test.rs"]
mod util_test;
