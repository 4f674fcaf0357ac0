use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Periodic demo publisher feeding the SSE endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub event_id: String,
    pub event_type: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_INTERVAL_SECS,
            event_id: String::from("1"),
            event_type: String::from("new-auto"),
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_secs < MIN_INTERVAL_SECS || self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::config(format!(
                "demo.interval_secs must be {}-{}, got {}",
                MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, self.interval_secs
            )));
        }

        // Both end up on a single wire line
        if self.event_id.contains('\n') || self.event_type.contains('\n') {
            return Err(ConfigError::config(
                "demo.event_id and demo.event_type must not contain line breaks",
            ));
        }

        Ok(())
    }
}
