mod test_pattern_source;

use crate::{CameraError, FrameSource, FrameSourceFactory, PixelFormat, Result};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

/// Factory whose sources count opens and closes, and which can refuse one device
#[derive(Clone, Default)]
pub(crate) struct CountingFactory {
    pub(crate) fail_on: Option<&'static str>,
    /// Frames a source yields before it reports the device gone
    pub(crate) frame_limit: Option<u64>,
    pub(crate) opened: Arc<AtomicUsize>,
    pub(crate) closed: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct CountingSource {
    sequence: u64,
    frame_limit: Option<u64>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl FrameSource for CountingSource {
    async fn next_frame(&mut self) -> Option<Bytes> {
        if self.frame_limit.is_some_and(|limit| self.sequence >= limit) {
            return None;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.sequence += 1;
        Some(Bytes::from(self.sequence.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl FrameSourceFactory for CountingFactory {
    fn open(&self, device_path: &str, _format: PixelFormat) -> Result<Box<dyn FrameSource>> {
        if self.fail_on == Some(device_path) {
            return Err(CameraError::device_open(device_path, "no such device"));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSource {
            sequence: 0,
            frame_limit: self.frame_limit,
            closed: self.closed.clone(),
        }))
    }
}
