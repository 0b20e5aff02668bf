// SPDX-License-Identifier: GPL-3.0-only

//! Depth frame conversion and display handoff
//!
//! The core of the viewer: [`normalize`] turns one raw depth frame into an
//! 8-bit grayscale frame, and [`FrameHandoff`] carries the most recent frame
//! from the capture thread to the display context without tearing or queuing.
//! [`DisplayOrientation`] describes the fixed presentation transform that
//! consumers apply when sampling pixels.

pub mod handoff;
pub mod normalizer;
pub mod types;

pub use handoff::FrameHandoff;
pub use normalizer::normalize;
pub use types::{DepthError, DisplayOrientation, GrayscaleFrame, RawDepthFrame};
