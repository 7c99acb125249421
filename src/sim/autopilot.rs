//! Demo autopilot
//!
//! Produces plausible [`FrameInput`]s for attract mode and soak runs: the ship
//! shadows the boss horizontally, drifts up and down, and fires in bursts.
//! Seeded, so two autopilots with the same seed drive identical games.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Simulation;
use super::tick::FrameInput;

/// Horizontal distance to the boss the autopilot tolerates before steering
const TRACKING_DEADZONE: f32 = 24.0;

pub struct Autopilot {
    rng: Pcg32,
    difficulty: f32,
    /// Vertical drift: -1 down, 0 hold, +1 up
    drift: i8,
    drift_frames: u32,
    fire_chance: f64,
}

impl Autopilot {
    pub fn new(seed: u64, difficulty: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            drift: 0,
            drift_frames: 0,
            fire_chance: 0.15,
        }
    }

    /// Choose input for the next frame from the current state
    pub fn next_input(&mut self, sim: &Simulation) -> FrameInput {
        let mut input = FrameInput {
            difficulty: self.difficulty,
            ..Default::default()
        };

        let player = sim.actor(sim.player_id()).map(|a| a.pos);
        let boss = sim.actor(sim.boss_id()).map(|a| a.pos);
        if let (Some(player), Some(boss)) = (player, boss) {
            let dx = boss.x - player.x;
            input.left = dx < -TRACKING_DEADZONE;
            input.right = dx > TRACKING_DEADZONE;
        }

        if self.drift_frames == 0 {
            self.drift = self.rng.random_range(-1..=1);
            self.drift_frames = self.rng.random_range(20..90);
        }
        self.drift_frames -= 1;
        input.up = self.drift > 0;
        input.down = self.drift < 0;

        input.fire = self.rng.random_bool(self.fire_chance);
        input
    }
}
