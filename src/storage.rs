// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot file storage
//!
//! Writes the currently displayed frame as a PNG, with the presentation
//! transform baked in so the file matches what the viewer shows.

use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::info;

use crate::depth::{DisplayOrientation, GrayscaleFrame};
use crate::errors::{AppError, AppResult};

/// Directory where snapshots are saved
pub fn snapshot_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("depthview")
}

/// Timestamped default path for a new snapshot
pub fn default_snapshot_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    snapshot_directory().join(format!("DEPTH_{}.png", timestamp))
}

/// Rasterize a frame with the presentation transform applied
pub fn render_oriented(frame: &GrayscaleFrame, orientation: DisplayOrientation) -> GrayImage {
    let (display_width, display_height) = orientation.display_size(frame.width, frame.height);
    GrayImage::from_fn(display_width, display_height, |dx, dy| {
        let (sx, sy) = orientation.source_coords(dx, dy, frame.width, frame.height);
        image::Luma([frame.pixel(sx, sy)])
    })
}

/// Save a frame as a PNG at `path`, creating parent directories as needed
pub fn write_snapshot(
    frame: &GrayscaleFrame,
    orientation: DisplayOrientation,
    path: &Path,
) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    render_oriented(frame, orientation)
        .save(path)
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(path = %path.display(), "Snapshot saved");
    Ok(())
}
