use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Drain-and-replace slots per subscriber
pub const MIN_FRAME_SLOTS: usize = 0;
pub const MAX_FRAME_SLOTS: usize = 16;
pub const DEFAULT_FRAME_SLOTS: usize = 1;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 120;
pub const DEFAULT_FPS: u32 = 30;

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Device paths; camera ids are assigned from 1 in this order
    pub devices: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub frame_slots: usize,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            devices: vec![
                String::from("/dev/video0"),
                String::from("/dev/video2"),
                String::from("/dev/video4"),
            ],
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frame_slots: DEFAULT_FRAME_SLOTS,
            fps: DEFAULT_FPS,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.devices.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::camera("camera.devices must not contain empty paths"));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::camera(format!(
                "camera resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if self.frame_slots > MAX_FRAME_SLOTS {
            return Err(ConfigError::camera(format!(
                "camera.frame_slots must be {}-{}, got {}",
                MIN_FRAME_SLOTS, MAX_FRAME_SLOTS, self.frame_slots
            )));
        }

        if self.fps < MIN_FPS || self.fps > MAX_FPS {
            return Err(ConfigError::camera(format!(
                "camera.fps must be {}-{}, got {}",
                MIN_FPS, MAX_FPS, self.fps
            )));
        }

        Ok(())
    }
}
