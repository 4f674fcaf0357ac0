mod camera_config;
mod client_config;
mod config;
mod demo_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod sse_config;

#[cfg(test)]
mod tests;

pub use camera_config::CameraConfig;
pub use client_config::ClientConfig;
pub use config::Config;
pub use demo_config::DemoConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use sse_config::SseConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8888;
const MIN_PORT: u16 = 1024;

const DEFAULT_SSE_PATH: &str = "/dartcounter/sse";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
