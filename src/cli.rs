// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless operation
//!
//! This module provides command-line functionality for:
//! - Capturing a single depth frame to a PNG file
//! - Printing the effective configuration

use depthview::constants::timing;
use depthview::depth::DisplayOrientation;
use depthview::pipelines::DepthPreviewPipeline;
use depthview::{Config, storage};
use std::path::PathBuf;
use std::time::Instant;

/// Capture one depth frame and save it as a PNG
///
/// Runs the pipeline just long enough for the first frame to arrive, then
/// writes it with the presentation transform applied.
pub fn take_snapshot(
    config: &Config,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let mut pipeline = DepthPreviewPipeline::start(config);
    let handoff = pipeline.handoff();

    let deadline = Instant::now() + timing::SNAPSHOT_WAIT_TIMEOUT;
    let frame = loop {
        if let Some(frame) = handoff.current_frame() {
            break frame;
        }
        if Instant::now() >= deadline {
            pipeline.stop();
            return Err("No depth frame arrived before the timeout".into());
        }
        std::thread::sleep(timing::SNAPSHOT_POLL_INTERVAL);
    };
    pipeline.stop();

    let path = output.unwrap_or_else(storage::default_snapshot_path);
    storage::write_snapshot(&frame, DisplayOrientation::default(), &path)?;
    println!("Saved: {}", path.display());

    Ok(())
}

/// Print the effective configuration and derived values
pub fn show_info(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Configuration file: {}", Config::config_path().display());
    println!();
    println!("Depth ceiling:      {:.2} m", config.max_depth_meters);
    println!(
        "Source:             {}x{} @ {} fps (synthetic)",
        config.source.width, config.source.height, config.source.framerate
    );
    println!(
        "Frame interval:     {:.1} ms",
        config.source.frame_duration().as_secs_f64() * 1000.0
    );
    println!(
        "Snapshot directory: {}",
        storage::snapshot_directory().display()
    );

    if let Err(e) = config.validate() {
        println!();
        println!("Warning: {}", e);
    }

    Ok(())
}
