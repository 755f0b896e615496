//! Configuration file support for inkboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/inkboard/config.toml`. Settings
//! include surface geometry, brush defaults, and recording options.
//!
//! If no config file exists, sensible defaults are used automatically.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::capture::SaveConfig;
use crate::draw::{Color, color::WHITE};
use crate::util;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [surface]
/// width = 800
/// height = 600
///
/// [brush]
/// color = "white"
/// thickness = 2.0
///
/// [recording]
/// framerate = 30
/// encoder = "ffmpeg"
/// filename = "whiteboard_recording"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing surface geometry
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Brush defaults (color, thickness)
    #[serde(default)]
    pub brush: BrushConfig,

    /// Recording pipeline options
    #[serde(default)]
    pub recording: RecordingConfig,
}

/// Surface geometry, fixed for the engine's lifetime.
#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Brush defaults applied when the engine starts.
#[derive(Debug, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Stroke color name (red, green, blue, yellow, orange, pink, white, black)
    pub color: String,
    /// Stroke thickness in pixels
    pub thickness: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: "white".to_string(),
            thickness: 2.0,
        }
    }
}

/// Recording pipeline options.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Nominal frames per second declared to the encoder
    pub framerate: u32,
    /// Encoder binary to spawn
    pub encoder: PathBuf,
    /// Output directory for exported clips (defaults to the videos folder)
    pub directory: Option<PathBuf>,
    /// Filename stem for exported clips
    pub filename: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            framerate: 30,
            encoder: PathBuf::from("ffmpeg"),
            directory: None,
            filename: "whiteboard_recording".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the given path, or the default location.
    ///
    /// A missing file is not an error: defaults apply. A file that exists
    /// but cannot be parsed is reported, so typos never silently vanish.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path.or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            _ => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        config.validate_and_clamp();
        Ok(config)
    }

    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `surface.width` / `surface.height`: 1 - 8192
    /// - `brush.thickness`: 1.0 - 20.0
    /// - `recording.framerate`: 1 - 60
    fn validate_and_clamp(&mut self) {
        if !(1..=8192).contains(&self.surface.width) {
            log::warn!(
                "Invalid surface width {}, clamping to 1-8192 range",
                self.surface.width
            );
            self.surface.width = self.surface.width.clamp(1, 8192);
        }

        if !(1..=8192).contains(&self.surface.height) {
            log::warn!(
                "Invalid surface height {}, clamping to 1-8192 range",
                self.surface.height
            );
            self.surface.height = self.surface.height.clamp(1, 8192);
        }

        if !(1.0..=20.0).contains(&self.brush.thickness) {
            log::warn!(
                "Invalid brush thickness {:.1}, clamping to 1.0-20.0 range",
                self.brush.thickness
            );
            self.brush.thickness = self.brush.thickness.clamp(1.0, 20.0);
        }

        if !(1..=60).contains(&self.recording.framerate) {
            log::warn!(
                "Invalid recording framerate {}, clamping to 1-60 range",
                self.recording.framerate
            );
            self.recording.framerate = self.recording.framerate.clamp(1, 60);
        }

        if util::name_to_color(&self.brush.color).is_none() {
            log::warn!(
                "Unknown brush color '{}', falling back to white",
                self.brush.color
            );
            self.brush.color = "white".to_string();
        }
    }

    /// The configured brush color.
    pub fn brush_color(&self) -> Color {
        util::name_to_color(&self.brush.color).unwrap_or(WHITE)
    }

    /// Export settings for the recording save path.
    pub fn save_config(&self) -> SaveConfig {
        let defaults = SaveConfig::default();
        SaveConfig {
            directory: self
                .recording
                .directory
                .clone()
                .unwrap_or(defaults.directory),
            filename: self.recording.filename.clone(),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inkboard").join("config.toml"))
}
