//! Scheduler configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the command scheduler.
///
/// The scheduler itself is fixed-function; configuration covers the loop
/// watchdog, which must stay in sync with the host control period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Host control-loop period in milliseconds; the per-tick watchdog
    /// budget.
    pub loop_period_ms: u64,
    /// Whether loop overruns are reported through `tracing::warn!`.
    pub warn_on_overrun: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            loop_period_ms: 20,
            warn_on_overrun: true,
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.loop_period_ms == 0 {
            return Err("loop_period_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the environment (a `.env` file is honored
    /// if present), falling back to defaults for unset variables.
    ///
    /// Recognized variables: `COMMANDEER_LOOP_PERIOD_MS`,
    /// `COMMANDEER_WARN_ON_OVERRUN`.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let mut cfg = Self::default();
        if let Ok(value) = std::env::var("COMMANDEER_LOOP_PERIOD_MS") {
            cfg.loop_period_ms = value
                .parse()
                .map_err(|e| format!("COMMANDEER_LOOP_PERIOD_MS invalid: {e}"))?;
        }
        if let Ok(value) = std::env::var("COMMANDEER_WARN_ON_OVERRUN") {
            cfg.warn_on_overrun = value
                .parse()
                .map_err(|e| format!("COMMANDEER_WARN_ON_OVERRUN invalid: {e}"))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// The loop period as a `Duration`.
    #[must_use]
    pub fn loop_period(&self) -> Duration {
        Duration::from_millis(self.loop_period_ms)
    }
}
