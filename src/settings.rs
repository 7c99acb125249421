//! Player preferences
//!
//! Edited by the host's options dialog and handed to the simulation each
//! frame through [`FrameInput::difficulty`](crate::sim::FrameInput).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_DIFFICULTY;
use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Boss bullet interval slider (0 = relaxed, 100 = fastest volleys)
    pub bullet_interval: f32,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,

    /// Frames to wait after the options dialog closes before play resumes
    pub resume_delay_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bullet_interval: 0.0,
            sfx_volume: 1.0,
            music_volume: 0.7,
            resume_delay_frames: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        for (field, volume) in [
            ("sfx_volume", settings.sfx_volume),
            ("music_volume", settings.music_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} is outside [0, 1]", volume),
                });
            }
        }
        log::info!("Loaded settings (difficulty {})", settings.difficulty());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Difficulty scalar clamped to [0, 100]
    pub fn difficulty(&self) -> f32 {
        self.bullet_interval.clamp(0.0, MAX_DIFFICULTY)
    }
}
