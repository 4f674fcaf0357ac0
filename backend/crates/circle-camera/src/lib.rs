//! Live view fan-out for the board cameras.
//!
//! Every camera owns a drain-and-replace [`circle_sse::BroadcastHub`] of
//! encoded frames: a viewer that falls behind only ever sees the latest frame
//! and is never dropped for being slow.

pub mod camera;
pub mod camera_admin;
pub mod error;
pub mod frame_source;
pub mod pixel_format;
pub mod test_pattern_source;

pub use camera::Camera;
pub use camera_admin::CameraAdmin;
pub use error::{CameraError, Result};
pub use frame_source::{FrameSource, FrameSourceFactory};
pub use pixel_format::{FourCc, PixelFormat};
pub use test_pattern_source::{TestPatternFactory, TestPatternSource};

#[cfg(test)]
mod tests;

/// Log target of the camera administration
pub const LOG_TARGET: &str = "camera-admin";

/// Device nodes of the three board cameras, numbered 1 to 3 in this order
pub const DEFAULT_DEVICES: [&str; 3] = ["/dev/video0", "/dev/video2", "/dev/video4"];
