//! Application settings
//!
//! Loaded from a JSON file when one is given; anything missing falls back to
//! defaults. Gameplay balance is nested under `tuning`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Application settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window / screen title
    pub title: String,
    /// Target frame rate of the fixed-tick loop
    pub fps: u32,
    /// Base RNG seed; sessions use `seed + session_index`. Random when unset.
    pub seed: Option<u64>,
    /// Demo mode: the autopilot plays and screens advance on their own
    pub demo: bool,
    /// Stop after this many sessions (unlimited when unset)
    pub session_limit: Option<u32>,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Dino Dash".to_string(),
            fps: TARGET_FPS,
            seed: None,
            demo: false,
            session_limit: None,
            music_volume: 0.7,
            muted: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.music_volume) {
            return Err(ConfigError::Invalid {
                field: "music_volume",
                reason: "must be within 0.0 - 1.0".to_string(),
            });
        }
        self.tuning.validate()?;
        // Tuning checks tunneling at the default rate; a slower loop takes longer steps
        let ground_thickness = self.tuning.field_height - self.tuning.ground_y;
        if self.tuning.max_fall_speed * self.dt() >= ground_thickness {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: format!("too low for max_fall_speed {}", self.tuning.max_fall_speed),
            });
        }
        Ok(())
    }

    /// Fixed simulation timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Milliseconds per tick at the configured frame rate
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps.max(1)) as u64
    }
}
