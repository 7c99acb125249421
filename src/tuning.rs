//! Data-driven game balance
//!
//! Every number the actors use lives here so a balance pass can be loaded
//! from JSON without recompiling. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ScreenBounds;
use crate::consts::*;

/// Errors raised while loading tuning or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance values for every actor variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen: ScreenBounds,

    // === Player ===
    pub player_speed: f32,
    pub player_radius: f32,
    pub player_start_y: f32,

    // === Boss ===
    pub boss_speed: f32,
    pub boss_radius: f32,
    pub boss_start_y: f32,
    pub boss_bob_amplitude: f32,
    pub boss_bob_omega: f32,
    pub boss_turn_margin: f32,
    /// Seconds between volleys at difficulty 0
    pub boss_fire_interval: f32,
    /// Fraction of the interval removed at maximum difficulty
    pub boss_fire_difficulty_scale: f32,
    /// Number of rays in a volley, spread evenly over ±90°
    pub boss_volley_size: usize,
    pub boss_bullet_speed: f32,

    // === Projectiles ===
    pub player_bullet_speed: f32,
    pub player_bullet_radius: f32,
    pub boss_bullet_radius: f32,
    pub cull_margin: f32,

    // === Background ===
    pub tile_width: f32,
    pub tile_height: f32,
    pub tile_columns: u32,
    pub tile_rows: u32,
    pub tile_wrap_rows: u32,
    pub tile_scroll: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen: ScreenBounds::default(),

            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            player_start_y: PLAYER_START_Y,

            boss_speed: BOSS_SPEED,
            boss_radius: BOSS_RADIUS,
            boss_start_y: BOSS_START_Y,
            boss_bob_amplitude: BOSS_BOB_AMPLITUDE,
            boss_bob_omega: BOSS_BOB_OMEGA,
            boss_turn_margin: BOSS_TURN_MARGIN,
            boss_fire_interval: BOSS_FIRE_INTERVAL,
            boss_fire_difficulty_scale: BOSS_FIRE_DIFFICULTY_SCALE,
            boss_volley_size: BOSS_VOLLEY_SIZE,
            boss_bullet_speed: BOSS_BULLET_SPEED,

            player_bullet_speed: PLAYER_BULLET_SPEED,
            player_bullet_radius: PLAYER_BULLET_RADIUS,
            boss_bullet_radius: BOSS_BULLET_RADIUS,
            cull_margin: CULL_MARGIN,

            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            tile_columns: TILE_COLUMNS,
            tile_rows: TILE_ROWS,
            tile_wrap_rows: TILE_WRAP_ROWS,
            tile_scroll: TILE_SCROLL,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON balance file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("player_radius", self.player_radius)?;
        positive("boss_radius", self.boss_radius)?;
        positive("player_bullet_radius", self.player_bullet_radius)?;
        positive("boss_bullet_radius", self.boss_bullet_radius)?;
        positive("boss_fire_interval", self.boss_fire_interval)?;
        positive("tile_height", self.tile_height)?;

        if !(0.0..1.0).contains(&self.boss_fire_difficulty_scale) {
            return Err(ConfigError::Invalid {
                field: "boss_fire_difficulty_scale",
                reason: format!("{} is outside [0, 1)", self.boss_fire_difficulty_scale),
            });
        }
        if self.boss_turn_margin * 2.0 >= self.screen.width {
            return Err(ConfigError::Invalid {
                field: "boss_turn_margin",
                reason: format!(
                    "{} leaves no room to move on a {} wide screen",
                    self.boss_turn_margin, self.screen.width
                ),
            });
        }
        if self.tile_wrap_rows == 0 || self.tile_wrap_rows > self.tile_rows {
            return Err(ConfigError::Invalid {
                field: "tile_wrap_rows",
                reason: format!("must be in 1..={}", self.tile_rows),
            });
        }
        Ok(())
    }

    /// Seconds between boss volleys for a difficulty in [0, 100]
    pub fn fire_threshold(&self, difficulty: f32) -> f32 {
        let difficulty = difficulty.clamp(0.0, MAX_DIFFICULTY);
        let speedup = self.boss_fire_difficulty_scale * difficulty / MAX_DIFFICULTY;
        self.boss_fire_interval * (1.0 - speedup)
    }

    /// Ray angles of a boss volley, symmetric about the vertical axis.
    ///
    /// A single ray points straight along the base vector; larger fans are
    /// spread evenly from +90° to -90°.
    pub fn volley_angles(&self) -> Vec<f32> {
        use std::f32::consts::FRAC_PI_2;

        let n = self.boss_volley_size;
        if n <= 1 {
            return vec![0.0; n];
        }
        let step = std::f32::consts::PI / (n - 1) as f32;
        (0..n).map(|i| FRAC_PI_2 - step * i as f32).collect()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} must be a positive number", value),
        })
    }
}
