// SPDX-License-Identifier: GPL-3.0-only

//! Capture-side pipelines

pub mod preview;

pub use preview::DepthPreviewPipeline;
