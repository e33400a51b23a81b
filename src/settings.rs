//! Game settings
//!
//! Loaded from an optional JSON file; anything missing takes its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SceneLayout;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "MONSTER_SHOOTER_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Field width in world units
    pub field_width: f32,
    /// Field height in world units
    pub field_height: f32,

    // === Sprites ===
    pub player_size: Vec2,
    pub monster_size: Vec2,
    pub projectile_radius: f32,

    // === Run ===
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Length of a headless session in seconds
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let layout = SceneLayout::default();
        Self {
            field_width: layout.field.x,
            field_height: layout.field.y,

            player_size: layout.player_size,
            monster_size: layout.monster_size,
            projectile_radius: layout.projectile_radius,

            seed: None,
            autopilot: true,
            demo_seconds: 90.0,
        }
    }
}

impl Settings {
    /// Scene dimensions derived from these settings
    pub fn layout(&self) -> SceneLayout {
        SceneLayout {
            field: Vec2::new(self.field_width, self.field_height),
            player_size: self.player_size,
            monster_size: self.monster_size,
            projectile_radius: self.projectile_radius,
        }
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        positive("monster_size.x", self.monster_size.x)?;
        positive("monster_size.y", self.monster_size.y)?;
        positive("projectile_radius", self.projectile_radius)?;
        if !(self.demo_seconds.is_finite() && self.demo_seconds >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "demo_seconds",
                reason: "must be zero or more",
            });
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, else from `$MONSTER_SHOOTER_SETTINGS`, else defaults.
    ///
    /// A file that fails to load is logged and replaced by defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(SETTINGS_ENV).map(PathBuf::from));

        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
