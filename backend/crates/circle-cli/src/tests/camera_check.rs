use crate::{CliError, run_camera_check};

use std::time::Duration;

use circle_camera::CameraError;
use circle_config::CameraConfig;

fn camera_config() -> CameraConfig {
    CameraConfig {
        devices: vec!["/dev/video0".to_string(), "/dev/video2".to_string()],
        width: 640,
        height: 480,
        frame_slots: 1,
        fps: 60,
    }
}

#[tokio::test]
async fn test_camera_check_counts_frames() {
    let report = run_camera_check(&camera_config(), 2, Duration::from_millis(300))
        .await
        .unwrap();

    assert_eq!(report.camera_id, 2);
    assert!(report.frames > 0);
    assert!(report.bytes > 0);
}

#[tokio::test]
async fn test_camera_check_unknown_camera() {
    let result = run_camera_check(&camera_config(), 3, Duration::from_millis(100)).await;

    assert!(matches!(
        result,
        Err(CliError::Camera(CameraError::UnknownCamera { camera_id: 3, .. }))
    ));
}
