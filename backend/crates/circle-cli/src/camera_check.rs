use crate::CliResult;

use std::time::Duration;

use bytes::Bytes;
use circle_camera::{CameraAdmin, TestPatternFactory};
use circle_config::CameraConfig;
use circle_sse::Subscription;
use tokio::time::{Instant, timeout_at};

const SUBSCRIBER_NAME: &str = "maint";

/// Outcome of a camera maintenance run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraReport {
    pub camera_id: usize,
    pub frames: u64,
    pub bytes: u64,
}

/// Start every configured camera on the test pattern, watch `camera_id` for
/// `duration` and shut everything down again.
pub async fn run_camera_check(
    config: &CameraConfig,
    camera_id: usize,
    duration: Duration,
) -> CliResult<CameraReport> {
    let mut admin = CameraAdmin::new(&config.devices, config.frame_slots);
    admin
        .start(config.width, config.height, &TestPatternFactory::new(config.fps))
        .await?;

    let subscription = match admin.subscribe(camera_id, SUBSCRIBER_NAME) {
        Ok(subscription) => subscription,
        Err(e) => {
            admin.shutdown().await?;
            return Err(e.into());
        }
    };

    let report = count_frames(camera_id, &subscription, Instant::now() + duration).await;

    admin.unsubscribe(camera_id, &subscription, SUBSCRIBER_NAME)?;
    admin.shutdown().await?;

    Ok(report)
}

async fn count_frames(
    camera_id: usize,
    subscription: &Subscription<Bytes>,
    deadline: Instant,
) -> CameraReport {
    let mut report = CameraReport {
        camera_id,
        frames: 0,
        bytes: 0,
    };

    while let Ok(Some(frame)) = timeout_at(deadline, subscription.recv()).await {
        report.frames += 1;
        report.bytes += frame.len() as u64;
    }

    report
}
