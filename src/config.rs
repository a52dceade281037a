//! Editor configuration
//!
//! A small RON file (`gearbox.ron`) for the knobs that are worth changing
//! without recompiling: design resolution, musical defaults, and the project
//! directory. Loaded once at startup; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Validation limits for configuration values
pub mod limits {
    /// Design resolution bounds
    pub const MIN_BASE: f32 = 320.0;
    pub const MAX_BASE: f32 = 16384.0;
    /// Tempo bounds
    pub const MIN_BPM: f32 = 20.0;
    pub const MAX_BPM: f32 = 999.0;
    /// Snap division bounds (fractions of a beat)
    pub const MIN_SNAP: f32 = 1.0;
    pub const MAX_SNAP: f32 = 64.0;
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Design resolution the layout is authored at
    pub base_width: f32,
    pub base_height: f32,
    /// Musical defaults for new sessions
    pub bpm: f32,
    pub time_signature: (f32, f32),
    pub snap_division: f32,
    /// Where the file browser starts; None falls back to the
    /// per-user default
    pub project_dir: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_width: 1280.0,
            base_height: 720.0,
            bpm: 120.0,
            time_signature: (4.0, 4.0),
            snap_division: 4.0,
            project_dir: None,
        }
    }
}

impl EditorConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: EditorConfig = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |name: &str, value: f32, min: f32, max: f32| {
            if !value.is_finite() || value < min || value > max {
                Err(ConfigError::ValidationError(format!(
                    "{}: {} out of range [{}, {}]",
                    name, value, min, max
                )))
            } else {
                Ok(())
            }
        };
        check("base_width", self.base_width, limits::MIN_BASE, limits::MAX_BASE)?;
        check("base_height", self.base_height, limits::MIN_BASE, limits::MAX_BASE)?;
        check("bpm", self.bpm, limits::MIN_BPM, limits::MAX_BPM)?;
        check("time_signature numerator", self.time_signature.0, 1.0, 32.0)?;
        check("time_signature denominator", self.time_signature.1, 1.0, 32.0)?;
        check("snap_division", self.snap_division, limits::MIN_SNAP, limits::MAX_SNAP)?;
        Ok(())
    }

    /// The directory the file browser starts in
    pub fn project_dir(&self) -> String {
        self.project_dir
            .clone()
            .unwrap_or_else(default_project_dir)
    }
}

/// Per-user default project directory (`~/.gearbox/Projects`)
pub fn default_project_dir() -> String {
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".gearbox")
            .join("Projects")
            .to_string_lossy()
            .into_owned();
    }
    ".".to_string()
}
