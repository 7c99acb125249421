//! Simulation state and render-facing types
//!
//! `Simulation` is the single owner of everything the game loop mutates. The
//! host constructs it once and passes it to [`step`](super::tick::step) every
//! frame; there is no global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorClass, ActorId};
use super::collision::CollisionIndex;
use super::stage::WorldStage;
use super::tick::FrameInput;
use crate::tuning::{ConfigError, Tuning};

/// Notifications for the host's audio, UI and render layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired; play the shot sound
    PlayerFired { bullet: ActorId },
    /// Boss released a fan of bullets
    BossVolley { shots: usize },
    /// Pause was just entered; show the options dialog
    ShowOptions,
    /// Resume countdown finished
    Resumed,
    /// `target` received a hit from `other`
    Hit { target: ActorId, other: ActorId },
    /// Actor left the world; drop its sprite
    Despawned { id: ActorId },
}

/// Render-ready view of one actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub class: ActorClass,
    pub pos: Vec2,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id(),
            class: actor.class(),
            pos: actor.pos,
        }
    }
}

/// Everything the host needs to present one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frames stepped so far
    pub frame: u64,
    pub paused: bool,
    /// Live actors in handle order
    pub actors: Vec<ActorView>,
    pub player_damage: u32,
    pub boss_damage: u32,
    /// Events raised during this step, in order
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    /// HUD label for the boss damage counter
    pub fn boss_label(&self) -> String {
        format!("Boss:{}", self.boss_damage)
    }

    /// HUD label for the player damage counter
    pub fn player_label(&self) -> String {
        format!("Player:{}", self.player_damage)
    }

    pub fn count(&self, class: ActorClass) -> usize {
        self.actors.iter().filter(|a| a.class == class).count()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) tuning: Tuning,
    pub(crate) stage: WorldStage,
    pub(crate) index: CollisionIndex,
    player: ActorId,
    boss: ActorId,
    pub(crate) paused: bool,
    /// Frames left before an automatic resume (0 = none pending)
    pub(crate) pause_timer: u32,
    pub(crate) frame: u64,
    /// Events raised between steps, reported by the next step
    pub(crate) pending_events: Vec<GameEvent>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Create a simulation with the shipped balance
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Create a simulation from a JSON balance file
    pub fn from_tuning_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_tuning(Tuning::from_json(json)?))
    }

    /// Create a simulation and populate the opening scene: a scrolling
    /// background grid, the player near the bottom and the boss above it.
    pub fn with_tuning(tuning: Tuning) -> Self {
        let mut stage = WorldStage::new();

        for row in 0..tuning.tile_rows {
            for col in 0..tuning.tile_columns {
                let x = col as f32 * tuning.tile_width;
                let y = row as f32 * tuning.tile_height;
                let pos = Vec2::new(x, y);
                stage.spawn(|id| Actor::background(id, pos));
            }
        }

        let center_x = tuning.screen.center_x();
        let player_pos = Vec2::new(center_x, tuning.player_start_y);
        let player = stage.spawn(|id| Actor::player(id, player_pos, &tuning));
        let boss_pos = Vec2::new(center_x, tuning.boss_start_y);
        let boss = stage.spawn(|id| Actor::boss(id, boss_pos, &tuning));

        let report = stage.commit(&mut Vec::new());
        log::info!(
            "Simulation created: {} actors on a {}x{} screen",
            report.added,
            tuning.screen.width,
            tuning.screen.height
        );

        Self {
            tuning,
            stage,
            index: CollisionIndex::new(),
            player,
            boss,
            paused: false,
            pause_timer: 0,
            frame: 0,
            pending_events: Vec::new(),
        }
    }

    /// Advance one frame; see [`step`](super::tick::step)
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> FrameSnapshot {
        super::tick::step(self, input, dt)
    }

    /// Queue a new actor built with a fresh handle; it goes live at the end
    /// of the next step
    pub fn spawn<F>(&mut self, build: F) -> ActorId
    where
        F: FnOnce(ActorId, &Tuning) -> Actor,
    {
        let tuning = &self.tuning;
        self.stage.spawn(|id| build(id, tuning))
    }

    /// Queue an actor for removal. Safe to call repeatedly.
    pub fn despawn(&mut self, id: ActorId) {
        self.stage.enqueue_remove(id);
    }

    /// Start the resume countdown once the options dialog closes.
    ///
    /// `frames == 0` resumes immediately; the `Resumed` event is reported by
    /// the next step.
    pub fn resume_after(&mut self, frames: u32) {
        if !self.paused {
            return;
        }
        if frames == 0 {
            self.paused = false;
            self.pause_timer = 0;
            self.pending_events.push(GameEvent::Resumed);
            log::info!("Resumed");
        } else {
            self.pause_timer = frames;
            log::info!("Resuming in {} frames", frames);
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player_id(&self) -> ActorId {
        self.player
    }

    pub fn boss_id(&self) -> ActorId {
        self.boss
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.stage.get(id)
    }

    pub fn is_live(&self, id: ActorId) -> bool {
        self.stage.contains(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.stage.iter()
    }

    pub fn live_count(&self) -> usize {
        self.stage.len()
    }

    /// Hits taken by the player
    pub fn player_damage(&self) -> u32 {
        self.actor(self.player).map_or(0, |a| a.damage)
    }

    /// Hits taken by the boss
    pub fn boss_damage(&self) -> u32 {
        self.actor(self.boss).map_or(0, |a| a.damage)
    }

    pub fn snapshot(&self, events: Vec<GameEvent>) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            paused: self.paused,
            actors: self.stage.iter().map(ActorView::from).collect(),
            player_damage: self.player_damage(),
            boss_damage: self.boss_damage(),
            events,
        }
    }
}
