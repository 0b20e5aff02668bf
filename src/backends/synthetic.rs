// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic depth source
//!
//! Generates a deterministic animated depth scene for running the viewer
//! without sensing hardware: a backdrop wall with a depth gradient and a
//! spherical target orbiting through the near field. The handler receives a
//! borrowed frame view per iteration; the scratch buffer is reused for the
//! next frame as soon as the handler returns.

use std::f32::consts::TAU;
use std::thread;
use std::time::Instant;

use tracing::debug;

use crate::config::SourceSettings;
use crate::depth::RawDepthFrame;

use super::frame_loop::{CaptureLoopController, LoopAction};

/// Backdrop depth at the bottom edge, meters
const BACKDROP_NEAR_M: f32 = 1.6;

/// Backdrop depth at the top edge, meters
const BACKDROP_FAR_M: f32 = 4.2;

/// Depth of the target's closest point, meters
///
/// Kept below 1 m so the target stays in the non-saturated intensity range.
const TARGET_NEAR_M: f32 = 0.45;

/// Depth falloff from the target center to its rim, meters
const TARGET_CURVE_M: f32 = 0.5;

/// Target radius as a fraction of the smaller frame dimension
const TARGET_RADIUS_FRAC: f32 = 0.18;

/// Horizontal and vertical orbit amplitude as fractions of the frame size
const ORBIT_X_FRAC: f32 = 0.30;
const ORBIT_Y_FRAC: f32 = 0.22;

/// Frames per full orbit of the target
const ORBIT_PERIOD_FRAMES: u64 = 180;

/// Synthetic depth camera backend
///
/// Runs a paced capture loop on its own thread and invokes the registered
/// per-frame handler once per generated frame. Dropping the source stops the
/// loop.
pub struct SyntheticDepthSource {
    controller: CaptureLoopController,
}

impl SyntheticDepthSource {
    /// Start generating frames at the configured rate
    ///
    /// The handler is called from the capture thread; the frame view it
    /// receives is only valid for the duration of the call.
    pub fn start<F>(settings: SourceSettings, mut on_frame: F) -> Self
    where
        F: FnMut(RawDepthFrame<'_>) + Send + 'static,
    {
        let frame_duration = settings.frame_duration();
        let controller = CaptureLoopController::start_with_init(
            "synthetic-depth",
            move || DepthScene::new(settings),
            move |scene| {
                let started = Instant::now();
                scene.advance();
                on_frame(scene.frame());
                if let Some(remaining) = frame_duration.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
                LoopAction::Continue
            },
        );
        Self { controller }
    }

    /// Check if the capture loop is still running
    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Stop the capture loop and wait for the thread to finish
    pub fn stop(&mut self) {
        self.controller.stop();
    }
}

/// Animated depth scene rendered into a reusable sample buffer
struct DepthScene {
    width: u32,
    height: u32,
    samples: Vec<f32>,
    frame_index: u64,
}

impl DepthScene {
    fn new(settings: SourceSettings) -> Result<Self, String> {
        if settings.width == 0 || settings.height == 0 {
            return Err(format!(
                "scene dimensions must be positive, got {}x{}",
                settings.width, settings.height
            ));
        }
        debug!(
            width = settings.width,
            height = settings.height,
            framerate = settings.framerate,
            "Synthetic depth scene initialized"
        );
        Ok(Self {
            width: settings.width,
            height: settings.height,
            samples: vec![0.0; settings.width as usize * settings.height as usize],
            frame_index: 0,
        })
    }

    /// Render the next frame into the sample buffer
    fn advance(&mut self) {
        let w = self.width as f32;
        let h = self.height as f32;

        let phase = TAU * (self.frame_index % ORBIT_PERIOD_FRAMES) as f32
            / ORBIT_PERIOD_FRAMES as f32;
        let center_x = 0.5 * w + ORBIT_X_FRAC * w * phase.cos();
        let center_y = 0.5 * h + ORBIT_Y_FRAC * h * phase.sin();
        let radius = TARGET_RADIUS_FRAC * w.min(h);
        let radius_sq = radius * radius;

        let mut idx = 0;
        for y in 0..self.height {
            let fy = y as f32;
            // Backdrop recedes toward the top of the frame. It sits entirely
            // beyond 1 m, so it saturates white and the target reads against it.
            let backdrop =
                BACKDROP_FAR_M + (BACKDROP_NEAR_M - BACKDROP_FAR_M) * (fy / (h - 1.0).max(1.0));
            for x in 0..self.width {
                let fx = x as f32;
                let dx = fx - center_x;
                let dy = fy - center_y;
                let dist_sq = dx * dx + dy * dy;
                self.samples[idx] = if dist_sq < radius_sq {
                    TARGET_NEAR_M + TARGET_CURVE_M * (dist_sq / radius_sq)
                } else {
                    backdrop
                };
                idx += 1;
            }
        }

        self.frame_index += 1;
    }

    /// Borrowed view of the current frame
    fn frame(&self) -> RawDepthFrame<'_> {
        RawDepthFrame::new(self.width, self.height, &self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn settings(width: u32, height: u32, framerate: u32) -> SourceSettings {
        SourceSettings {
            width,
            height,
            framerate,
        }
    }

    #[test]
    fn test_scene_shape_and_validity() {
        let mut scene = DepthScene::new(settings(32, 24, 30)).unwrap();
        scene.advance();
        let frame = scene.frame();
        assert!(frame.validate().is_ok());
        assert_eq!(frame.samples.len(), 32 * 24);
        assert!(frame.samples.iter().all(|d| d.is_finite() && *d > 0.0));
    }

    #[test]
    fn test_scene_has_near_field_target() {
        let mut scene = DepthScene::new(settings(64, 48, 30)).unwrap();
        scene.advance();
        let near = scene.frame().samples.iter().filter(|d| **d < 1.0).count();
        assert!(near > 0, "target should place samples below 1 m");
        let far = scene.frame().samples.iter().filter(|d| **d >= 1.0).count();
        assert!(far > near, "backdrop should dominate the frame");
    }

    #[test]
    fn test_scene_is_deterministic() {
        let mut a = DepthScene::new(settings(40, 30, 30)).unwrap();
        let mut b = DepthScene::new(settings(40, 30, 30)).unwrap();
        for _ in 0..5 {
            a.advance();
            b.advance();
        }
        assert_eq!(a.frame().samples, b.frame().samples);
    }

    #[test]
    fn test_scene_animates_between_frames() {
        let mut scene = DepthScene::new(settings(40, 30, 30)).unwrap();
        scene.advance();
        let first: Vec<f32> = scene.frame().samples.to_vec();
        for _ in 0..ORBIT_PERIOD_FRAMES / 4 {
            scene.advance();
        }
        assert_ne!(first, scene.frame().samples.to_vec());
    }

    #[test]
    fn test_scene_rejects_zero_dimensions() {
        assert!(DepthScene::new(settings(0, 24, 30)).is_err());
        assert!(DepthScene::new(settings(32, 0, 30)).is_err());
    }

    #[test]
    fn test_source_delivers_frames_to_handler() {
        let frames = Arc::new(AtomicU32::new(0));
        let shape = Arc::new(Mutex::new(None));
        let handler_frames = Arc::clone(&frames);
        let handler_shape = Arc::clone(&shape);

        let mut source = SyntheticDepthSource::start(settings(16, 12, 120), move |frame: RawDepthFrame<'_>| {
            assert!(frame.validate().is_ok());
            handler_frames.fetch_add(1, Ordering::SeqCst);
            *handler_shape.lock().unwrap() = Some((frame.width, frame.height));
        });

        let deadline = Instant::now() + Duration::from_secs(2);
        while frames.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        source.stop();

        assert!(frames.load(Ordering::SeqCst) >= 3, "expected at least 3 frames");
        assert_eq!(*shape.lock().unwrap(), Some((16, 12)));
    }
}
