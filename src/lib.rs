//! Shoot Boss - simulation core of a single-screen boss shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, collisions, deferred world mutation)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (difficulty, sound volume)
//!
//! Rendering, audio and input polling live outside this crate. They feed a
//! [`sim::FrameInput`] into [`sim::Simulation::step`] and consume the returned
//! [`sim::FrameSnapshot`].

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame delta (60 Hz host loop)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions (world units, y axis points up)
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 544.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_START_Y: f32 = 100.0;

    /// Boss defaults
    pub const BOSS_SPEED: f32 = 80.0;
    pub const BOSS_RADIUS: f32 = 32.0;
    pub const BOSS_START_Y: f32 = 250.0;
    /// Vertical bob: `y += amplitude * sin(frame * omega)` each frame
    pub const BOSS_BOB_AMPLITUDE: f32 = 1.7;
    pub const BOSS_BOB_OMEGA: f32 = 0.015;
    /// Horizontal turnaround distance from either screen edge
    pub const BOSS_TURN_MARGIN: f32 = 100.0;
    /// Seconds between volleys at difficulty 0
    pub const BOSS_FIRE_INTERVAL: f32 = 1.0;
    /// Fraction of the interval removed at difficulty 100
    pub const BOSS_FIRE_DIFFICULTY_SCALE: f32 = 0.25;
    pub const BOSS_VOLLEY_SIZE: usize = 9;
    pub const BOSS_BULLET_SPEED: f32 = 100.0;

    /// Projectile defaults
    pub const PLAYER_BULLET_SPEED: f32 = 300.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 16.0;
    pub const BOSS_BULLET_RADIUS: f32 = 3.0;
    /// Boss bullets may leave the screen by this much before they are culled
    pub const CULL_MARGIN: f32 = 32.0;

    /// Background tiling
    pub const TILE_WIDTH: f32 = 192.0;
    pub const TILE_HEIGHT: f32 = 128.0;
    pub const TILE_COLUMNS: u32 = 6;
    pub const TILE_ROWS: u32 = 7;
    /// Tiles jump up by this many tile heights once they leave the bottom
    pub const TILE_WRAP_ROWS: u32 = 6;
    /// Scroll per frame (not scaled by dt)
    pub const TILE_SCROLL: f32 = 5.0;

    /// Difficulty range accepted from the options dialog
    pub const MAX_DIFFICULTY: f32 = 100.0;
}

/// Axis-aligned screen rectangle anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl ScreenBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// True once a point is past the top or right edge, or more than
    /// `margin` past the bottom or left edge
    #[inline]
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.y > self.height || pos.y < -margin || pos.x < -margin || pos.x > self.width
    }
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
