// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the depth pipeline
//!
//! Exercises the public API end to end: normalization laws, latest-wins
//! handoff behavior across threads, and a running preview pipeline feeding
//! frames from the synthetic source into the display-side slot.

use std::time::{Duration, Instant};

use depthview::depth::DepthError;
use depthview::storage;
use depthview::{
    Config, DepthPreviewPipeline, DisplayOrientation, FrameHandoff, GrayscaleFrame, RawDepthFrame,
    normalize,
};

fn test_config() -> Config {
    let mut config = Config::default();
    config.source.width = 32;
    config.source.height = 24;
    config.source.framerate = 120;
    config
}

fn wait_for_frame(handoff: &FrameHandoff, timeout: Duration) -> Option<GrayscaleFrame> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(frame) = handoff.current_frame() {
            return Some(frame);
        }
        if Instant::now() >= deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_normalize_reference_frame() {
    let samples = [0.5f32, 1.0, 2.0, 3.5];
    let frame = RawDepthFrame::new(2, 2, &samples);
    let gray = normalize(&frame, 3.0).expect("valid frame");
    assert_eq!(gray.pixels.as_ref(), &[128, 255, 255, 255]);
}

#[test]
fn test_normalize_preserves_shape_and_order() {
    // Distinct values in each corner so ordering mistakes are visible.
    let samples = [0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6];
    let frame = RawDepthFrame::new(3, 2, &samples);
    let gray = normalize(&frame, 3.0).expect("valid frame");
    assert_eq!((gray.width, gray.height), (3, 2));
    assert_eq!(gray.pixels.len(), 6);
    assert_eq!(gray.pixel(0, 0), 26);
    assert_eq!(gray.pixel(2, 1), 153);
}

#[test]
fn test_normalize_rejects_shape_mismatch_without_output() {
    let samples = [0.5f32; 7];
    let frame = RawDepthFrame::new(2, 4, &samples);
    match normalize(&frame, 3.0) {
        Err(DepthError::InvalidFrameShape {
            width,
            height,
            samples,
        }) => {
            assert_eq!((width, height, samples), (2, 4, 7));
        }
        other => panic!("expected InvalidFrameShape, got {other:?}"),
    }
}

#[test]
fn test_handoff_empty_then_latest_wins() {
    let handoff = FrameHandoff::new();
    assert!(handoff.current_frame().is_none());

    for marker in [1u8, 2, 3] {
        handoff.publish(GrayscaleFrame {
            width: 1,
            height: 1,
            pixels: vec![marker].into(),
        });
    }
    assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[3]);
}

#[test]
fn test_failed_frame_keeps_previous_display() {
    // The capture side skips frames that fail normalization; whatever was
    // published last stays visible.
    let handoff = FrameHandoff::new();
    let good = [0.5f32];
    let gray = normalize(&RawDepthFrame::new(1, 1, &good), 3.0).unwrap();
    handoff.publish(gray);

    let bad = [0.5f32, 0.6];
    assert!(normalize(&RawDepthFrame::new(1, 2, &bad[..1]), 3.0).is_err());

    assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[128]);
}

#[test]
fn test_pipeline_publishes_frames() {
    let config = test_config();
    let mut pipeline = DepthPreviewPipeline::start(&config);
    let handoff = pipeline.handoff();

    let frame = wait_for_frame(&handoff, Duration::from_secs(2))
        .expect("pipeline should publish a frame");
    pipeline.stop();

    assert_eq!((frame.width, frame.height), (32, 24));
    assert_eq!(frame.pixels.len(), 32 * 24);

    // The synthetic scene has a saturated backdrop and a near-field target.
    assert!(frame.pixels.iter().any(|&p| p == 255));
    assert!(frame.pixels.iter().any(|&p| p < 255));
}

#[test]
fn test_pipeline_frame_survives_stop() {
    let config = test_config();
    let mut pipeline = DepthPreviewPipeline::start(&config);
    let handoff = pipeline.handoff();

    wait_for_frame(&handoff, Duration::from_secs(2)).expect("first frame");
    pipeline.stop();
    assert!(!pipeline.is_running());

    // The slot never transitions back to empty on its own.
    assert!(handoff.current_frame().is_some());
}

#[test]
fn test_pipeline_frame_renders_with_orientation() {
    let config = test_config();
    let mut pipeline = DepthPreviewPipeline::start(&config);
    let handoff = pipeline.handoff();

    let frame = wait_for_frame(&handoff, Duration::from_secs(2)).expect("frame");
    pipeline.stop();

    let img = storage::render_oriented(&frame, DisplayOrientation::default());
    // The fixed presentation transform swaps the axes.
    assert_eq!(img.dimensions(), (24, 32));
}

#[test]
fn test_concurrent_publish_and_read() {
    let handoff = FrameHandoff::new();
    let producer = handoff.clone();

    let writer = std::thread::spawn(move || {
        for marker in 0..200u8 {
            producer.publish(GrayscaleFrame {
                width: 1,
                height: 1,
                pixels: vec![marker].into(),
            });
        }
    });

    // Reads interleave with publishes; every observed frame must be intact.
    while !writer.is_finished() {
        if let Some(frame) = handoff.current_frame() {
            assert_eq!(frame.pixels.len(), 1);
        }
    }
    writer.join().unwrap();

    assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[199]);
}
