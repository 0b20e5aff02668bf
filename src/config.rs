// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Settings persist as JSON under the user configuration directory. A missing
//! or unreadable file falls back to defaults; the viewer never refuses to
//! start over configuration problems it can paper over.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_DEPTH_METERS, source};
use crate::errors::{AppError, AppResult};

/// Depth source settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Capture rate in frames per second
    pub framerate: u32,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            width: source::DEFAULT_WIDTH,
            height: source::DEFAULT_HEIGHT,
            framerate: source::DEFAULT_FRAMERATE,
        }
    }
}

impl SourceSettings {
    /// Duration of one frame interval at the configured rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.framerate.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saturation ceiling for depth samples, in meters
    pub max_depth_meters: f32,
    /// Depth source settings
    pub source: SourceSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth_meters: DEFAULT_MAX_DEPTH_METERS,
            source: SourceSettings::default(),
        }
    }
}

impl Config {
    /// Path of the persisted configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depthview")
            .join("config.json")
    }

    /// Load the configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Config::config_path();
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Config::default();
        }
        match Config::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load configuration, using defaults");
                Config::default()
            }
        }
    }

    /// Load the configuration from a specific file
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Persist the configuration to the default location
    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Config::config_path())
    }

    /// Persist the configuration to a specific file
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Check that all settings are usable
    pub fn validate(&self) -> AppResult<()> {
        if !self.max_depth_meters.is_finite() || self.max_depth_meters <= 0.0 {
            return Err(AppError::Config(format!(
                "max_depth_meters must be positive, got {}",
                self.max_depth_meters
            )));
        }
        let s = &self.source;
        if s.width == 0 || s.height == 0 {
            return Err(AppError::Config(format!(
                "source dimensions must be positive, got {}x{}",
                s.width, s.height
            )));
        }
        if s.width > source::MAX_DIMENSION || s.height > source::MAX_DIMENSION {
            return Err(AppError::Config(format!(
                "source dimensions exceed {} pixels: {}x{}",
                source::MAX_DIMENSION,
                s.width,
                s.height
            )));
        }
        if s.framerate == 0 || s.framerate > source::MAX_FRAMERATE {
            return Err(AppError::Config(format!(
                "framerate must be in 1..={}, got {}",
                source::MAX_FRAMERATE,
                s.framerate
            )));
        }
        Ok(())
    }
}
