// SPDX-License-Identifier: GPL-3.0-only

//! depthview - live depth camera visualization for the terminal
//!
//! Converts per-pixel depth frames into 8-bit grayscale images and shows
//! them live, most-recent-frame-wins, without blocking capture.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`depth`]: Frame normalization, the latest-frame handoff, and the
//!   presentation orientation - the core of the viewer
//! - [`backends`]: Depth frame sources and capture thread lifecycle
//! - [`pipelines`]: Glue from a running source into the handoff slot
//! - [`terminal`]: The terminal display context
//! - [`config`]: User configuration handling
//! - [`storage`]: Snapshot file storage

pub mod backends;
pub mod config;
pub mod constants;
pub mod depth;
pub mod errors;
pub mod pipelines;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use config::{Config, SourceSettings};
pub use depth::{DepthError, DisplayOrientation, FrameHandoff, GrayscaleFrame, RawDepthFrame, normalize};
pub use errors::{AppError, AppResult};
pub use pipelines::DepthPreviewPipeline;
