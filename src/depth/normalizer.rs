// SPDX-License-Identifier: GPL-3.0-only

//! Depth-to-grayscale conversion
//!
//! Converts one raw depth frame (f32 meters per pixel) into an 8-bit
//! grayscale frame for display. Depth beyond the ceiling saturates; the
//! transform never fails on out-of-range or non-finite sample values.

use crate::constants::DEPTH_INTENSITY_FULL_SCALE;

use super::types::{DepthError, GrayscaleFrame, RawDepthFrame};

/// Convert a raw depth frame to an 8-bit grayscale frame
///
/// Each sample is clamped to `max_depth_meters` at the top end and scaled by
/// a fixed 255 per meter into `[0, 255]`. The output preserves the source
/// dimensions and row-major order, one intensity per sample.
///
/// Rejects frames whose declared dimensions do not match the sample count,
/// and ceilings that are not positive finite, without producing any output.
pub fn normalize(
    frame: &RawDepthFrame<'_>,
    max_depth_meters: f32,
) -> Result<GrayscaleFrame, DepthError> {
    if !max_depth_meters.is_finite() || max_depth_meters <= 0.0 {
        return Err(DepthError::InvalidCeiling(max_depth_meters));
    }
    frame.validate()?;

    let mut pixels = Vec::with_capacity(frame.samples.len());
    pixels.extend(
        frame
            .samples
            .iter()
            .map(|&depth| intensity(depth, max_depth_meters)),
    );

    Ok(GrayscaleFrame {
        width: frame.width,
        height: frame.height,
        pixels: pixels.into(),
    })
}

/// Map one depth sample in meters to a display intensity
///
/// The scale factor is a fixed 255 per meter and is not derived from the
/// ceiling: with the default 3 m ceiling only depths below 1 m land in the
/// linear range and everything at or beyond 1 m renders white. The ceiling
/// bounds the clamp only. See DESIGN.md before changing this.
///
/// NaN samples render black. There is no lower clamp on the depth itself;
/// negative and -inf samples hit the intensity floor of 0.
fn intensity(depth_meters: f32, max_depth_meters: f32) -> u8 {
    if depth_meters.is_nan() {
        return 0;
    }
    let clamped = depth_meters.min(max_depth_meters);
    (clamped * DEPTH_INTENSITY_FULL_SCALE).clamp(0.0, 255.0).round() as u8
}
