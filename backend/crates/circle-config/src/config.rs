use crate::{
    CameraConfig, ClientConfig, ConfigError, ConfigErrorResult, DemoConfig, LoggingConfig,
    ServerConfig, SseConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "CIRCLE_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".circle";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub sse: SseConfig,
    pub demo: DemoConfig,
    pub camera: CameraConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CIRCLE_CONFIG_DIR env var, else use ./.circle/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CIRCLE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CIRCLE_CONFIG_DIR env var > ./.circle/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.sse.validate()?;
        self.demo.validate()?;
        self.camera.validate()?;
        self.client.validate()?;

        if let Some(ref file) = self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  sse: path={}, queue={}, send_buffer={}",
            self.sse.path, self.sse.queue_capacity, self.sse.send_buffer_size
        );
        info!(
            "  demo: {} (every {}s, id={}, type={})",
            if self.demo.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.demo.interval_secs,
            self.demo.event_id,
            self.demo.event_type
        );
        info!(
            "  camera: {} device(s), {}x{} @ {}fps, slots={}",
            self.camera.devices.len(),
            self.camera.width,
            self.camera.height,
            self.camera.fps,
            self.camera.frame_slots
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("CIRCLE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("CIRCLE_SERVER_PORT", &mut self.server.port);

        // SSE
        Self::apply_env_string("CIRCLE_SSE_PATH", &mut self.sse.path);
        Self::apply_env_parse("CIRCLE_SSE_QUEUE_CAPACITY", &mut self.sse.queue_capacity);
        Self::apply_env_parse(
            "CIRCLE_SSE_SEND_BUFFER_SIZE",
            &mut self.sse.send_buffer_size,
        );

        // Demo
        Self::apply_env_bool("CIRCLE_DEMO_ENABLED", &mut self.demo.enabled);
        Self::apply_env_parse("CIRCLE_DEMO_INTERVAL_SECS", &mut self.demo.interval_secs);

        // Camera
        Self::apply_env_parse("CIRCLE_CAMERA_WIDTH", &mut self.camera.width);
        Self::apply_env_parse("CIRCLE_CAMERA_HEIGHT", &mut self.camera.height);
        Self::apply_env_parse("CIRCLE_CAMERA_FRAME_SLOTS", &mut self.camera.frame_slots);
        Self::apply_env_parse("CIRCLE_CAMERA_FPS", &mut self.camera.fps);

        // Client
        Self::apply_env_string("CIRCLE_CLIENT_BASE_URL", &mut self.client.base_url);
        Self::apply_env_string("CIRCLE_CLIENT_PATH", &mut self.client.path);

        // Logging
        Self::apply_env_parse("CIRCLE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CIRCLE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CIRCLE_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
