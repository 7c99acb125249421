//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-call delta time only
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by actor handle)
//! - No rendering, audio or platform dependencies
//!
//! A frame is tick → resolve → commit: actors move and register collision
//! probes, overlaps are dispatched, then queued spawns/despawns are applied.

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod stage;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorClass, ActorId, ActorKind, BossState, CollisionShape, HitResponse};
pub use autopilot::Autopilot;
pub use collision::{Category, CollisionIndex, Probe, TESTED_PAIRS};
pub use stage::{CommitReport, PendingQueue, WorldStage};
pub use state::{ActorView, FrameSnapshot, GameEvent, Simulation};
pub use tick::{FrameInput, step};
