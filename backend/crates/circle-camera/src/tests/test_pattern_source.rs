use crate::{FrameSource, FrameSourceFactory, PixelFormat, TestPatternFactory, TestPatternSource};

use googletest::assert_that;
use googletest::prelude::{anything, err};

#[tokio::test]
async fn given_test_pattern_when_frames_read_then_jpeg_markers_present() {
    // Given
    let mut source = TestPatternSource::new("/dev/video0", PixelFormat::mjpeg(640, 480), 120);

    // When
    let frame = source.next_frame().await.unwrap();

    // Then
    assert_eq!(&frame[..2], &[0xFF, 0xD8]);
    assert_eq!(&frame[frame.len() - 2..], &[0xFF, 0xD9]);
    let text = String::from_utf8_lossy(&frame);
    assert!(text.contains("/dev/video0 #1 640x480 MJPG"));
}

#[tokio::test]
async fn given_test_pattern_when_frames_read_then_sequence_increments() {
    let mut source = TestPatternSource::new("/dev/video2", PixelFormat::mjpeg(320, 240), 120);

    let _first = source.next_frame().await.unwrap();
    let second = source.next_frame().await.unwrap();

    assert!(String::from_utf8_lossy(&second).contains("#2 "));
}

#[tokio::test]
async fn given_closed_source_when_read_then_none() {
    let mut source = TestPatternSource::new("/dev/video4", PixelFormat::mjpeg(320, 240), 30);

    source.close().await.unwrap();

    assert!(source.next_frame().await.is_none());
}

#[test]
fn given_empty_device_path_when_opened_then_error() {
    let factory = TestPatternFactory::new(30);

    let result = factory.open("  ", PixelFormat::mjpeg(1920, 1080));

    assert_that!(result.map(|_| ()), err(anything()));
}
