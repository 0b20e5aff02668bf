// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Default saturation ceiling for depth samples, in meters
///
/// Samples beyond this distance are clamped, not discarded.
pub const DEFAULT_MAX_DEPTH_METERS: f32 = 3.0;

/// Intensity scale applied to clamped depth, in units per meter
///
/// This is a fixed full-scale factor, not derived from the clamp ceiling:
/// 1 m maps to intensity 255, so with the default 3 m ceiling every sample
/// at or beyond 1 m renders white. See DESIGN.md before changing it.
pub const DEPTH_INTENSITY_FULL_SCALE: f32 = 255.0;

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Display event poll interval (~60 Hz redraw)
    pub const DISPLAY_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// How long headless capture waits for the first frame before giving up
    pub const SNAPSHOT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Poll interval while waiting for the first frame headlessly
    pub const SNAPSHOT_POLL_INTERVAL: Duration = Duration::from_millis(10);
}

/// Depth source defaults and limits
pub mod source {
    /// Default frame width in pixels
    pub const DEFAULT_WIDTH: u32 = 640;

    /// Default frame height in pixels
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Default capture rate in frames per second
    pub const DEFAULT_FRAMERATE: u32 = 30;

    /// Upper bound on either frame dimension
    pub const MAX_DIMENSION: u32 = 4096;

    /// Upper bound on the capture rate
    pub const MAX_FRAMERATE: u32 = 240;
}
