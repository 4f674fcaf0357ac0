use crate::{FrameSource, LOG_TARGET, Result};

use bytes::Bytes;
use circle_sse::{BackpressurePolicy, BroadcastHub, ShutdownCoordinator, ShutdownGuard};
use log::{debug, info, warn};
use tokio::task::JoinHandle;

/// One capture device and the viewers attached to it.
pub struct Camera {
    id: usize,
    device_path: String,
    hub: BroadcastHub<Bytes>,
    publisher: Option<FramePublisher>,
}

/// Running frame publisher. The task hands the source back when it ends so
/// the device is closed only after nothing reads from it anymore.
struct FramePublisher {
    stop: ShutdownCoordinator,
    handle: JoinHandle<Box<dyn FrameSource>>,
}

impl Camera {
    pub fn new(id: usize, device_path: &str, frame_slots: usize) -> Self {
        Self {
            id,
            device_path: device_path.to_string(),
            hub: BroadcastHub::new(BackpressurePolicy::drain_and_replace(frame_slots)),
            publisher: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    pub fn hub(&self) -> &BroadcastHub<Bytes> {
        &self.hub
    }

    pub fn is_started(&self) -> bool {
        self.publisher.is_some()
    }

    /// Start forwarding frames from `source` to the viewers.
    pub(crate) fn start(&mut self, source: Box<dyn FrameSource>) {
        let stop = ShutdownCoordinator::new();
        let handle = tokio::spawn(publish_frames(
            self.id,
            source,
            self.hub.clone(),
            stop.subscribe_guard(),
        ));

        self.publisher = Some(FramePublisher { stop, handle });
    }

    /// Release all viewers, stop the publisher and close the device.
    pub(crate) async fn stop(&mut self) -> Result<()> {
        self.hub.unsubscribe_all();

        let Some(publisher) = self.publisher.take() else {
            return Ok(());
        };

        publisher.stop.shutdown();
        match publisher.handle.await {
            Ok(mut source) => source.close().await,
            Err(e) => {
                // The source went down with the task
                warn!(target: LOG_TARGET, "frame publisher of camera {} failed: {}", self.id, e);
                Ok(())
            }
        }
    }
}

/// Forward frames while anyone is watching. Frames arriving with no
/// subscribers are discarded.
async fn publish_frames(
    camera_id: usize,
    mut source: Box<dyn FrameSource>,
    hub: BroadcastHub<Bytes>,
    mut stop: ShutdownGuard,
) -> Box<dyn FrameSource> {
    loop {
        tokio::select! {
            biased;

            _ = stop.wait() => {
                debug!(target: LOG_TARGET, "frame publisher of camera {} stopped", camera_id);
                break;
            }

            frame = source.next_frame() => match frame {
                Some(frame) => {
                    if hub.subscriptions() > 0 {
                        hub.publish(frame);
                    }
                }
                None => {
                    info!(target: LOG_TARGET, "camera {} stopped delivering frames", camera_id);
                    break;
                }
            },
        }
    }

    source
}
