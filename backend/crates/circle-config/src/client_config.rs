use crate::{ConfigError, ConfigErrorResult, DEFAULT_SSE_PATH};

use serde::Deserialize;

pub const MIN_CLIENT_QUEUE_CAPACITY: usize = 1;
pub const MAX_CLIENT_QUEUE_CAPACITY: usize = 10000;
pub const DEFAULT_CLIENT_QUEUE_CAPACITY: usize = 10;

/// SSE stream client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub path: String,
    /// Parsed records buffered for the consumer
    pub queue_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8888"),
            path: String::from(DEFAULT_SSE_PATH),
            queue_capacity: DEFAULT_CLIENT_QUEUE_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::client(format!(
                "client.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if !self.path.starts_with('/') {
            return Err(ConfigError::client(format!(
                "client.path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.queue_capacity < MIN_CLIENT_QUEUE_CAPACITY
            || self.queue_capacity > MAX_CLIENT_QUEUE_CAPACITY
        {
            return Err(ConfigError::client(format!(
                "client.queue_capacity must be {}-{}, got {}",
                MIN_CLIENT_QUEUE_CAPACITY, MAX_CLIENT_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        Ok(())
    }
}
