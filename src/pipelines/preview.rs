// SPDX-License-Identifier: GPL-3.0-only

//! Live depth preview pipeline
//!
//! Glues the source to the display handoff: every captured frame is
//! normalized synchronously in the capture context and published to the
//! latest-frame slot. A frame that fails normalization is skipped with a
//! warning; the previously displayed frame stays up and the capture loop
//! keeps running.

use tracing::{debug, warn};

use crate::backends::SyntheticDepthSource;
use crate::config::Config;
use crate::constants::timing::FRAME_LOG_INTERVAL;
use crate::depth::{FrameHandoff, RawDepthFrame, normalize};

/// Running preview pipeline
///
/// Owns the capture source and the handoff slot. The display context takes a
/// [`FrameHandoff`] clone and pulls [`current_frame`](FrameHandoff::current_frame)
/// on its own schedule.
pub struct DepthPreviewPipeline {
    handoff: FrameHandoff,
    source: SyntheticDepthSource,
}

impl DepthPreviewPipeline {
    /// Start capturing and publishing frames
    pub fn start(config: &Config) -> Self {
        let handoff = FrameHandoff::new();
        let slot = handoff.clone();
        let max_depth_meters = config.max_depth_meters;
        let mut published: u64 = 0;

        let source = SyntheticDepthSource::start(config.source, move |raw: RawDepthFrame<'_>| {
            match normalize(&raw, max_depth_meters) {
                Ok(frame) => {
                    slot.publish(frame);
                    published += 1;
                    if published % FRAME_LOG_INTERVAL == 0 {
                        debug!(frames = published, "Depth frames published");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Skipping depth frame");
                }
            }
        });

        Self { handoff, source }
    }

    /// Handoff slot for the display context
    pub fn handoff(&self) -> FrameHandoff {
        self.handoff.clone()
    }

    /// Check if the capture side is still running
    pub fn is_running(&self) -> bool {
        self.source.is_running()
    }

    /// Stop capturing
    ///
    /// The handoff keeps its last frame; consumers continue to see it until
    /// a new session publishes again.
    pub fn stop(&mut self) {
        self.source.stop();
    }
}
