use crate::{CameraError, FrameSource, FrameSourceFactory, PixelFormat, Result};

use std::time::Duration;

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use tokio::time::{Interval, MissedTickBehavior, interval};

const START_OF_IMAGE: [u8; 2] = [0xFF, 0xD8];
const COMMENT_MARKER: [u8; 2] = [0xFF, 0xFE];
const END_OF_IMAGE: [u8; 2] = [0xFF, 0xD9];

/// Synthetic camera for maintenance runs and tests.
///
/// Emits small JPEG-framed images at a fixed rate. Each carries a comment
/// segment with the device path, the frame sequence number and the
/// resolution.
pub struct TestPatternSource {
    device_path: String,
    format: PixelFormat,
    ticker: Interval,
    sequence: u64,
    closed: bool,
}

impl TestPatternSource {
    pub fn new(device_path: &str, format: PixelFormat, fps: u32) -> Self {
        let mut ticker = interval(Duration::from_secs(1) / fps.max(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            device_path: device_path.to_string(),
            format,
            ticker,
            sequence: 0,
            closed: false,
        }
    }

    fn render(&self) -> Bytes {
        let comment = format!(
            "{} #{} {}",
            self.device_path, self.sequence, self.format
        );
        // Segment length counts its own two length bytes
        let segment_len = (comment.len() + 2) as u16;

        let mut frame = BytesMut::with_capacity(comment.len() + 8);
        frame.put_slice(&START_OF_IMAGE);
        frame.put_slice(&COMMENT_MARKER);
        frame.put_u16(segment_len);
        frame.put_slice(comment.as_bytes());
        frame.put_slice(&END_OF_IMAGE);
        frame.freeze()
    }
}

#[async_trait]
impl FrameSource for TestPatternSource {
    async fn next_frame(&mut self) -> Option<Bytes> {
        if self.closed {
            return None;
        }

        self.ticker.tick().await;
        self.sequence += 1;
        Some(self.render())
    }

    async fn close(&mut self) -> Result<()> {
        debug!(
            "test pattern {} closed after {} frames",
            self.device_path, self.sequence
        );
        self.closed = true;
        Ok(())
    }
}

/// Opens a [`TestPatternSource`] for any non-empty device path.
#[derive(Debug, Clone, Copy)]
pub struct TestPatternFactory {
    fps: u32,
}

impl TestPatternFactory {
    pub fn new(fps: u32) -> Self {
        Self { fps }
    }
}

impl FrameSourceFactory for TestPatternFactory {
    fn open(&self, device_path: &str, format: PixelFormat) -> Result<Box<dyn FrameSource>> {
        if device_path.trim().is_empty() {
            return Err(CameraError::device_open(device_path, "empty device path"));
        }

        Ok(Box::new(TestPatternSource::new(device_path, format, self.fps)))
    }
}
