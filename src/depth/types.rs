// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the depth visualization pipeline

use std::sync::Arc;

/// A single raw depth frame borrowed from the sensing subsystem
///
/// The sample buffer is only valid for the duration of the per-frame handler
/// call; the lifetime parameter keeps consumers from retaining it. Samples are
/// distances in meters, row-major, one per pixel. Invalid measurements may
/// appear as non-finite values.
#[derive(Debug, Clone, Copy)]
pub struct RawDepthFrame<'a> {
    pub width: u32,
    pub height: u32,
    /// Row-major depth samples in meters, `width * height` entries
    pub samples: &'a [f32],
}

impl<'a> RawDepthFrame<'a> {
    /// Create a frame view over a sample buffer
    pub fn new(width: u32, height: u32, samples: &'a [f32]) -> Self {
        Self {
            width,
            height,
            samples,
        }
    }

    /// Check that the declared dimensions match the sample count
    pub fn validate(&self) -> Result<(), DepthError> {
        let expected = self.width as usize * self.height as usize;
        if self.width == 0 || self.height == 0 || self.samples.len() != expected {
            return Err(DepthError::InvalidFrameShape {
                width: self.width,
                height: self.height,
                samples: self.samples.len(),
            });
        }
        Ok(())
    }
}

/// A normalized 8-bit grayscale frame ready for display
///
/// Pixel storage is reference counted so clones share the underlying buffer;
/// passing a frame through the handoff slot never copies pixel data.
/// Invariant: `pixels.len() == width * height`, row-major, same order as the
/// source depth samples.
#[derive(Debug, Clone)]
pub struct GrayscaleFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl GrayscaleFrame {
    /// Intensity at `(x, y)` in source orientation, clamped to the frame edge
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Presentation transform applied when rendering a frame
///
/// Depth sensors are commonly mounted mirrored and rotated relative to how
/// the scene should appear on screen. The transform is applied by mapping
/// display coordinates back to source coordinates at sampling time; pixel
/// data is never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrientation {
    /// Render pixels exactly as stored
    Identity,
    /// Horizontal mirror followed by a 90° clockwise rotation
    #[default]
    MirroredRotate90,
}

impl DisplayOrientation {
    /// Check if the transform swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, DisplayOrientation::MirroredRotate90)
    }

    /// Display dimensions for a source of `width x height`
    pub fn display_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Map display coordinates to the source pixel to sample
    ///
    /// `(dx, dy)` must lie within `display_size(src_width, src_height)`.
    pub fn source_coords(&self, dx: u32, dy: u32, src_width: u32, src_height: u32) -> (u32, u32) {
        match self {
            DisplayOrientation::Identity => (dx, dy),
            // Mirror sends x to W-1-x; the clockwise quarter turn then sends
            // (x, y) to column H-1-y, row x. Inverting the composition:
            DisplayOrientation::MirroredRotate90 => (
                src_width.saturating_sub(1).saturating_sub(dy),
                src_height.saturating_sub(1).saturating_sub(dx),
            ),
        }
    }
}

/// Errors from the depth conversion stage
#[derive(Debug, Clone, PartialEq)]
pub enum DepthError {
    /// Declared dimensions do not match the sample count
    InvalidFrameShape {
        width: u32,
        height: u32,
        samples: usize,
    },
    /// Saturation ceiling is not a positive finite distance
    InvalidCeiling(f32),
}

impl std::fmt::Display for DepthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthError::InvalidFrameShape {
                width,
                height,
                samples,
            } => write!(
                f,
                "Invalid frame shape: {}x{} declared but {} samples",
                width, height, samples
            ),
            DepthError::InvalidCeiling(ceiling) => {
                write!(f, "Invalid depth ceiling: {} m", ceiling)
            }
        }
    }
}

impl std::error::Error for DepthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_matching_shape() {
        let samples = vec![0.0f32; 6];
        assert!(RawDepthFrame::new(3, 2, &samples).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_sample_count_mismatch() {
        let samples = vec![0.0f32; 5];
        let err = RawDepthFrame::new(3, 2, &samples).validate().unwrap_err();
        assert_eq!(
            err,
            DepthError::InvalidFrameShape {
                width: 3,
                height: 2,
                samples: 5
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let samples: Vec<f32> = Vec::new();
        assert!(RawDepthFrame::new(0, 4, &samples).validate().is_err());
        assert!(RawDepthFrame::new(4, 0, &samples).validate().is_err());
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        let orientation = DisplayOrientation::MirroredRotate90;
        assert_eq!(orientation.display_size(640, 480), (480, 640));
        assert_eq!(DisplayOrientation::Identity.display_size(640, 480), (640, 480));
    }

    #[test]
    fn test_orientation_corner_mapping() {
        // 4x3 source: mirror then rotate 90° CW puts the source top-right at
        // the display top-right and the source bottom-right at display top-left.
        let o = DisplayOrientation::MirroredRotate90;
        let (dw, dh) = o.display_size(4, 3);
        assert_eq!((dw, dh), (3, 4));
        assert_eq!(o.source_coords(dw - 1, 0, 4, 3), (3, 0)); // display top-right
        assert_eq!(o.source_coords(0, 0, 4, 3), (3, 2)); // display top-left
        assert_eq!(o.source_coords(dw - 1, dh - 1, 4, 3), (0, 0)); // bottom-right
        assert_eq!(o.source_coords(0, dh - 1, 4, 3), (0, 2)); // bottom-left
    }

    #[test]
    fn test_orientation_full_mapping_2x3() {
        // Source 2x3 with pixels numbered 0..6 row-major.
        let frame = GrayscaleFrame {
            width: 2,
            height: 3,
            pixels: vec![0u8, 1, 2, 3, 4, 5].into(),
        };
        let o = DisplayOrientation::MirroredRotate90;
        let (dw, dh) = o.display_size(frame.width, frame.height);
        let mut rendered = Vec::new();
        for dy in 0..dh {
            for dx in 0..dw {
                let (sx, sy) = o.source_coords(dx, dy, frame.width, frame.height);
                rendered.push(frame.pixel(sx, sy));
            }
        }
        assert_eq!(rendered, vec![5, 3, 1, 4, 2, 0]);
    }

    #[test]
    fn test_pixel_clamps_to_edge() {
        let frame = GrayscaleFrame {
            width: 2,
            height: 2,
            pixels: vec![10u8, 20, 30, 40].into(),
        };
        assert_eq!(frame.pixel(5, 5), 40);
        assert_eq!(frame.pixel(0, 9), 30);
    }
}
