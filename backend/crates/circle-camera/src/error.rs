use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Unknown camera {camera_id} {location}")]
    UnknownCamera {
        camera_id: usize,
        location: ErrorLocation,
    },

    #[error("Opening camera failed (camera-id: {camera_id}, device-path: {device_path}): {message} {location}")]
    DeviceOpen {
        camera_id: usize,
        device_path: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cameras already started {location}")]
    AlreadyStarted { location: ErrorLocation },

    #[error("Cameras not started {location}")]
    NotStarted { location: ErrorLocation },
}

impl CameraError {
    #[track_caller]
    pub fn unknown_camera(camera_id: usize) -> Self {
        CameraError::UnknownCamera {
            camera_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Device open failure; camera id and path are filled in by the caller
    /// that knows them.
    #[track_caller]
    pub fn device_open<S: Into<String>>(device_path: &str, message: S) -> Self {
        CameraError::DeviceOpen {
            camera_id: 0,
            device_path: device_path.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_started() -> Self {
        CameraError::AlreadyStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_started() -> Self {
        CameraError::NotStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Attach the camera id to a [`CameraError::DeviceOpen`]; other variants
    /// are returned unchanged.
    pub fn for_camera(self, id: usize) -> Self {
        match self {
            CameraError::DeviceOpen {
                device_path,
                message,
                location,
                ..
            } => CameraError::DeviceOpen {
                camera_id: id,
                device_path,
                message,
                location,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, CameraError>;
