use crate::{Camera, CameraError, FrameSourceFactory, LOG_TARGET, PixelFormat, Result};

use bytes::Bytes;
use circle_sse::Subscription;
use log::{error, info};

/// Owns the board cameras and hands out live view subscriptions.
///
/// Cameras are numbered from 1 in the order their device paths were given.
pub struct CameraAdmin {
    cameras: Vec<Camera>,
}

impl CameraAdmin {
    /// `frame_slots` is the per-viewer frame buffer; 0 hands a frame over
    /// only to a viewer that is waiting for it.
    pub fn new<S: AsRef<str>>(devices: &[S], frame_slots: usize) -> Self {
        let cameras = devices
            .iter()
            .enumerate()
            .map(|(index, path)| Camera::new(index + 1, path.as_ref(), frame_slots))
            .collect();

        Self { cameras }
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Open every device with the requested resolution and start publishing.
    ///
    /// If a device fails to open, the cameras started so far are stopped
    /// again before the error is returned.
    pub async fn start(
        &mut self,
        width: u32,
        height: u32,
        factory: &dyn FrameSourceFactory,
    ) -> Result<()> {
        if self.cameras.iter().any(Camera::is_started) {
            return Err(CameraError::already_started());
        }

        info!(target: LOG_TARGET, "start cameras");
        let format = PixelFormat::mjpeg(width, height);

        for index in 0..self.cameras.len() {
            let camera = &mut self.cameras[index];

            match factory.open(camera.device_path(), format) {
                Ok(source) => {
                    info!(
                        target: LOG_TARGET,
                        "camera {} started on {} ({})",
                        camera.id(),
                        camera.device_path(),
                        format
                    );
                    camera.start(source);
                }
                Err(e) => {
                    let e = e.for_camera(camera.id());
                    error!(target: LOG_TARGET, "{}", e);
                    self.stop_all().await;
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Release every viewer, stop the publishers and close the devices.
    pub async fn shutdown(&mut self) -> Result<()> {
        if !self.cameras.iter().any(Camera::is_started) {
            return Err(CameraError::not_started());
        }

        info!(target: LOG_TARGET, "shut down cameras");

        let mut first_error = None;
        for camera in &mut self.cameras {
            if let Err(e) = camera.stop().await {
                error!(target: LOG_TARGET, "closing camera {} failed: {}", camera.id(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Subscribe to the live view of `camera_id`. `subscriber_name` is only
    /// used for logging and may be empty.
    pub fn subscribe(&self, camera_id: usize, subscriber_name: &str) -> Result<Subscription<Bytes>> {
        let camera = self.camera(camera_id)?;
        let subscription = camera.hub().subscribe();
        let registered = camera.hub().subscriptions();

        if subscriber_name.is_empty() {
            info!(
                target: LOG_TARGET,
                "client added on camera {}. {} registered clients",
                camera_id,
                registered
            );
        } else {
            info!(
                target: LOG_TARGET,
                "client added on camera {}. client ID: {}. {} registered clients",
                camera_id,
                subscriber_name,
                registered
            );
        }

        Ok(subscription)
    }

    /// Returns false if the subscription was no longer registered.
    pub fn unsubscribe(
        &self,
        camera_id: usize,
        subscription: &Subscription<Bytes>,
        subscriber_name: &str,
    ) -> Result<bool> {
        let camera = self.camera(camera_id)?;
        let matched = camera.hub().unsubscribe(subscription);
        let registered = camera.hub().subscriptions();

        if subscriber_name.is_empty() {
            info!(
                target: LOG_TARGET,
                "client removed from camera {}. {} registered clients",
                camera_id,
                registered
            );
        } else {
            info!(
                target: LOG_TARGET,
                "client removed from camera {}. client ID: {}. {} registered clients",
                camera_id,
                subscriber_name,
                registered
            );
        }

        Ok(matched)
    }

    pub fn subscriptions(&self, camera_id: usize) -> Result<usize> {
        Ok(self.camera(camera_id)?.hub().subscriptions())
    }

    fn camera(&self, camera_id: usize) -> Result<&Camera> {
        camera_id
            .checked_sub(1)
            .and_then(|index| self.cameras.get(index))
            .ok_or_else(|| CameraError::unknown_camera(camera_id))
    }

    async fn stop_all(&mut self) {
        for camera in &mut self.cameras {
            if let Err(e) = camera.stop().await {
                error!(target: LOG_TARGET, "closing camera {} failed: {}", camera.id(), e);
            }
        }
    }
}
