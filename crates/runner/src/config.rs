//! Runner configuration
//!
//! Loaded from JSON; every field is optional:
//!
//! ```json
//! {
//!   "tick_interval_ms": 1000,
//!   "time_scale": { "fast": 10 },
//!   "initial_bots": 2,
//!   "engine": { "processing_duration": 10, "removal_policy": "least_progress" },
//!   "feed": { "arrival_probability": 0.3, "vip_probability": 0.2, "seed": 42 }
//! }
//! ```

use counter_clock::TimeScale;
use counter_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::order_feed::OrderFeedConfig;

/// Longest real time allowed between two ticks
pub const MAX_TICK_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration for the engine service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Nominal time between ticks, before the time scale is applied
    pub tick_interval_ms: u64,

    pub time_scale: TimeScale,

    /// Bots admitted before the service starts
    pub initial_bots: usize,

    /// Capacity of the command and update channels
    pub channel_capacity: usize,

    pub engine: EngineConfig,

    /// Random order arrivals, one draw per tick
    pub feed: Option<OrderFeedConfig>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            time_scale: TimeScale::Normal,
            initial_bots: 0,
            channel_capacity: 256,
            engine: EngineConfig::default(),
            feed: None,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Configuration for tests and embedding: no timer, ticks only on request
    pub fn manual() -> Self {
        Self {
            time_scale: TimeScale::Fixed,
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 && self.time_scale != TimeScale::Fixed {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive unless time_scale is fixed".to_string(),
            ));
        }
        if let Some(period) = self.time_scale.real_period(self.tick_interval()) {
            if period.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "tick period rounds to zero ({}ms under {:?})",
                    self.tick_interval_ms, self.time_scale
                )));
            }
            if period > MAX_TICK_PERIOD {
                return Err(ConfigError::Invalid(format!(
                    "tick period {:?} exceeds {:?}",
                    period, MAX_TICK_PERIOD
                )));
            }
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be positive".to_string(),
            ));
        }
        self.engine
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if let Some(feed) = &self.feed {
            feed.validate()?;
        }
        Ok(())
    }
}
