use crate::{PixelFormat, Result};

use async_trait::async_trait;
use bytes::Bytes;

/// A started capture device producing encoded frames.
#[async_trait]
pub trait FrameSource: Send {
    /// Next captured frame. `None` once the device stopped delivering.
    async fn next_frame(&mut self) -> Option<Bytes>;

    /// Stop capturing and release the device.
    async fn close(&mut self) -> Result<()>;
}

/// Opens and starts capture devices.
pub trait FrameSourceFactory: Send + Sync {
    fn open(&self, device_path: &str, format: PixelFormat) -> Result<Box<dyn FrameSource>>;
}
