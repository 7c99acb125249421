//! Per-frame driver
//!
//! Core game loop that advances the simulation one frame at a time.

use serde::{Deserialize, Serialize};

use super::state::{FrameSnapshot, GameEvent, Simulation};

/// Input for a single frame, sampled by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Directional buttons (held)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire button pressed this frame
    pub fire: bool,
    /// Pause button pressed this frame
    pub pause: bool,
    /// Difficulty slider in [0, 100]; shortens the boss fire interval
    pub difficulty: f32,
}

/// Advance the simulation by one frame.
///
/// Order is fixed:
/// 1. A pause press while running pauses and asks the host for the options dialog
/// 2. A pending resume countdown ticks down and unpauses at zero
/// 3. Every live actor ticks and registers its probes
/// 4. Collisions are resolved against this frame's positions, then cleared
/// 5. Queued spawns and despawns are committed
///
/// Steps 4 and 5 run even while paused.
pub fn step(sim: &mut Simulation, input: &FrameInput, dt: f32) -> FrameSnapshot {
    let mut events = std::mem::take(&mut sim.pending_events);

    if input.pause && !sim.paused {
        sim.paused = true;
        sim.pause_timer = 0;
        log::info!("Paused at frame {}", sim.frame);
        events.push(GameEvent::ShowOptions);
    }

    if sim.pause_timer > 0 {
        sim.pause_timer -= 1;
        if sim.pause_timer == 0 {
            sim.paused = false;
            log::info!("Resumed at frame {}", sim.frame);
            events.push(GameEvent::Resumed);
        }
    }

    sim.stage.tick_all(dt, sim.paused, input, &sim.tuning, &mut sim.index, &mut events);

    sim.stage.resolve_hits(&sim.index, &mut events);
    sim.index.clear();

    sim.stage.commit(&mut events);
    sim.frame += 1;

    sim.snapshot(events)
}
