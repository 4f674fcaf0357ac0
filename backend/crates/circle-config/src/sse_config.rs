use crate::{ConfigError, ConfigErrorResult, DEFAULT_SSE_PATH};

use serde::Deserialize;

// Subscriber queue capacity constraints (evict-on-full)
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 10000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

// Response chunk buffer constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 16;

/// SSE endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SseConfig {
    /// Route the event stream is served on
    pub path: String,
    /// Pending events per subscriber before it is evicted as too slow
    pub queue_capacity: usize,
    /// Encoded frames buffered between a session and its HTTP response
    pub send_buffer_size: usize,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_SSE_PATH),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl SseConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::sse(format!(
                "sse.path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.queue_capacity < MIN_QUEUE_CAPACITY || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::sse(format!(
                "sse.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::sse(format!(
                "sse.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
