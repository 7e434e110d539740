//! Settings and preferences
//!
//! JSON on disk; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Field;

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid field size {width}x{height}")]
    FieldSize { width: f32, height: f32 },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for pitch selection and contact jitter
    pub seed: u64,

    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    /// Bat swings on its own
    pub demo_mode: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            demo_mode: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Playfield described by these settings
    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        // The bat pivot sits 120px above the bottom and the pitcher at y=150
        let usable = self.field_width.is_finite()
            && self.field_height.is_finite()
            && self.field_width >= 100.0
            && self.field_height >= 400.0;
        if !usable {
            return Err(SettingsError::FieldSize {
                width: self.field_width,
                height: self.field_height,
            });
        }
        Ok(())
    }
}
