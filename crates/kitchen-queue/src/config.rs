//! Queue engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config:
//!
//! ```toml
//! scheduler_interval_secs = 5
//! refresh_interval_secs = 60
//! grace_period_secs = 30
//! channel_buffer = 32
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

/// Upper bound for `grace_period_secs`: one day.
const MAX_GRACE_PERIOD_SECS: u64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// How often the auto-advance scheduler scans the queue.
    pub scheduler_interval_secs: u64,
    /// How often the display's "now" is refreshed.
    pub refresh_interval_secs: u64,
    /// How long an order stays `ready` before it is delivered automatically.
    pub grace_period_secs: u64,
    /// Request buffer of the order actor.
    pub channel_buffer: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            scheduler_interval_secs: 5,
            refresh_interval_secs: 60,
            grace_period_secs: 30,
            channel_buffer: 32,
        }
    }
}

impl QueueConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler_interval_secs must be positive".into(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_interval_secs must be positive".into(),
            ));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Validation(
                "channel_buffer must be positive".into(),
            ));
        }
        if self.grace_period_secs > MAX_GRACE_PERIOD_SECS {
            return Err(ConfigError::Validation(format!(
                "grace_period_secs must be at most {MAX_GRACE_PERIOD_SECS}"
            )));
        }
        Ok(())
    }

    pub fn scheduler_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler_interval_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn grace_period(&self) -> chrono::Duration {
        let secs = self.grace_period_secs.min(MAX_GRACE_PERIOD_SECS);
        chrono::Duration::seconds(secs as i64)
    }
}

impl std::str::FromStr for QueueConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: QueueConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
