//! Actors: every simulated entity on screen
//!
//! The variant set is closed (player, boss, both projectile kinds, background
//! tiles), so actors are one struct with an [`ActorKind`] tag and dispatch by
//! `match`. Actors never touch the world directly: spawns and despawns go
//! through the [`PendingQueue`] and collision shapes go into the
//! [`CollisionIndex`], both of which are applied later in the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Category, CollisionIndex, Probe};
use super::stage::PendingQueue;
use super::state::GameEvent;
use super::tick::FrameInput;
use crate::rotate;
use crate::tuning::Tuning;

/// Opaque actor handle. Allocated by the world, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub(crate) u32);

/// Fieldless mirror of [`ActorKind`], used for hit filtering and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorClass {
    Player,
    Boss,
    PlayerBullet,
    BossBullet,
    Background,
}

/// Boss movement and weapon state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    /// Horizontal direction sign (+1 right, -1 left)
    pub direction: f32,
    /// Seconds accumulated toward the next volley
    pub fire_counter: f32,
}

/// Variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Boss(BossState),
    PlayerBullet { velocity: Vec2 },
    BossBullet { velocity: Vec2 },
    Background,
}

/// A circle attached to an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    pub category: Category,
    pub radius: f32,
}

impl CollisionShape {
    pub fn centered(category: Category, radius: f32) -> Self {
        Self { category, radius }
    }
}

/// How the receiver of a hit wants the other party handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResponse {
    /// Leave the other actor alone
    Ignore,
    /// Detach the other actor and queue it for removal
    Consume,
}

/// Everything an actor may read or append to while it ticks
pub struct TickContext<'a> {
    pub dt: f32,
    pub paused: bool,
    pub input: &'a FrameInput,
    pub tuning: &'a Tuning,
    pub commands: &'a mut PendingQueue,
    pub index: &'a mut CollisionIndex,
    pub events: &'a mut Vec<GameEvent>,
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vec2,
    /// Ticks seen while live, including paused ones
    pub frame_count: u32,
    /// Hits received
    pub damage: u32,
    pub kind: ActorKind,
    shapes: Vec<CollisionShape>,
    /// Visual and collision shapes are attached; cleared by [`Actor::detach`]
    attached: bool,
}

impl Actor {
    fn new(id: ActorId, pos: Vec2, kind: ActorKind, shapes: Vec<CollisionShape>) -> Self {
        Self {
            id,
            pos,
            frame_count: 0,
            damage: 0,
            kind,
            shapes,
            attached: true,
        }
    }

    pub fn player(id: ActorId, pos: Vec2, tuning: &Tuning) -> Self {
        let shape = CollisionShape::centered(Category::Player, tuning.player_radius);
        Self::new(id, pos, ActorKind::Player, vec![shape])
    }

    pub fn boss(id: ActorId, pos: Vec2, tuning: &Tuning) -> Self {
        let shape = CollisionShape::centered(Category::Boss, tuning.boss_radius);
        let state = BossState {
            direction: 1.0,
            fire_counter: 0.0,
        };
        Self::new(id, pos, ActorKind::Boss(state), vec![shape])
    }

    pub fn player_bullet(id: ActorId, pos: Vec2, tuning: &Tuning) -> Self {
        let radius = tuning.player_bullet_radius;
        let shape = CollisionShape::centered(Category::PlayerProjectile, radius);
        let velocity = Vec2::new(0.0, tuning.player_bullet_speed);
        Self::new(id, pos, ActorKind::PlayerBullet { velocity }, vec![shape])
    }

    pub fn boss_bullet(id: ActorId, pos: Vec2, velocity: Vec2, tuning: &Tuning) -> Self {
        let shape = CollisionShape::centered(Category::BossProjectile, tuning.boss_bullet_radius);
        Self::new(id, pos, ActorKind::BossBullet { velocity }, vec![shape])
    }

    pub fn background(id: ActorId, pos: Vec2) -> Self {
        Self::new(id, pos, ActorKind::Background, Vec::new())
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn class(&self) -> ActorClass {
        match self.kind {
            ActorKind::Player => ActorClass::Player,
            ActorKind::Boss(_) => ActorClass::Boss,
            ActorKind::PlayerBullet { .. } => ActorClass::PlayerBullet,
            ActorKind::BossBullet { .. } => ActorClass::BossBullet,
            ActorKind::Background => ActorClass::Background,
        }
    }

    pub fn shapes(&self) -> &[CollisionShape] {
        &self.shapes
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn boss_state(&self) -> Option<&BossState> {
        match &self.kind {
            ActorKind::Boss(state) => Some(state),
            _ => None,
        }
    }

    /// Drop the visual and stop registering collision shapes
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Final teardown when the world drops the actor
    pub(crate) fn dispose(mut self) {
        self.detach();
        log::trace!("{:?} {:?} disposed after {} frames", self.class(), self.id, self.frame_count);
    }

    /// Advance one frame, then register collision shapes.
    ///
    /// The frame counter advances even while paused; nothing else does.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.frame_count += 1;
        if ctx.paused {
            return;
        }

        match self.kind {
            ActorKind::Player => self.tick_player(ctx),
            ActorKind::Boss(_) => self.tick_boss(ctx),
            ActorKind::PlayerBullet { velocity } | ActorKind::BossBullet { velocity } => {
                self.tick_projectile(velocity, ctx)
            }
            ActorKind::Background => self.tick_background(ctx.tuning),
        }

        self.register_probes(ctx.index);
    }

    fn register_probes(&self, index: &mut CollisionIndex) {
        if !self.attached {
            return;
        }
        for shape in &self.shapes {
            index.register(Probe {
                category: shape.category,
                owner: self.id,
                center: self.pos,
                radius: shape.radius,
            });
        }
    }

    fn tick_player(&mut self, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let input = ctx.input;
        let screen = tuning.screen;
        let step = tuning.player_speed * ctx.dt;

        // Each direction moves and clamps independently
        let mut pos = self.pos;
        if input.up {
            pos.y = (pos.y + step).min(screen.height);
        }
        if input.down {
            pos.y = (pos.y - step).max(0.0);
        }
        if input.left {
            pos.x = (pos.x - step).max(0.0);
        }
        if input.right {
            pos.x = (pos.x + step).min(screen.width);
        }
        self.pos = pos;

        if input.fire {
            let bullet = ctx.commands.spawn(|id| Actor::player_bullet(id, pos, tuning));
            ctx.events.push(GameEvent::PlayerFired { bullet });
        }
    }

    fn tick_boss(&mut self, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let ActorKind::Boss(boss) = &mut self.kind else {
            return;
        };

        // Sinusoidal bob plus horizontal ping-pong
        let phase = self.frame_count as f32 * tuning.boss_bob_omega;
        self.pos.y += tuning.boss_bob_amplitude * phase.sin();
        self.pos.x += tuning.boss_speed * ctx.dt * boss.direction;
        if boss.direction > 0.0 {
            if self.pos.x > tuning.screen.width - tuning.boss_turn_margin {
                boss.direction = -1.0;
            }
        } else if self.pos.x < tuning.boss_turn_margin {
            boss.direction = 1.0;
        }

        boss.fire_counter += ctx.dt;
        if boss.fire_counter >= tuning.fire_threshold(ctx.input.difficulty) {
            boss.fire_counter = 0.0;

            let origin = self.pos;
            let base = Vec2::new(0.0, -tuning.boss_bullet_speed);
            let angles = tuning.volley_angles();
            for &angle in &angles {
                let velocity = rotate(base, angle);
                ctx.commands.spawn(|id| Actor::boss_bullet(id, origin, velocity, tuning));
            }
            log::debug!("Boss {:?} fired {} shots from {:?}", self.id, angles.len(), origin);
            ctx.events.push(GameEvent::BossVolley { shots: angles.len() });
        }
    }

    fn tick_projectile(&mut self, velocity: Vec2, ctx: &mut TickContext<'_>) {
        self.pos += velocity * ctx.dt;

        if ctx.tuning.screen.is_outside(self.pos, ctx.tuning.cull_margin) {
            self.detach();
            ctx.commands.despawn(self.id);
        }
    }

    fn tick_background(&mut self, tuning: &Tuning) {
        self.pos.y -= tuning.tile_scroll;
        if self.pos.y < -tuning.tile_height {
            self.pos.y += tuning.tile_height * tuning.tile_wrap_rows as f32;
        }
    }

    /// Record a hit from `other`.
    ///
    /// Always counts damage. The boss consumes player bullets that reach it;
    /// the caller detaches and despawns the other actor on [`HitResponse::Consume`].
    /// The receiver itself is never removed here.
    pub fn receive_hit(&mut self, other: ActorId, other_class: ActorClass) -> HitResponse {
        self.damage += 1;
        log::trace!("{:?} {:?} hit by {:?} {:?}", self.class(), self.id, other_class, other);

        match (&self.kind, other_class) {
            (ActorKind::Boss(_), ActorClass::PlayerBullet) => HitResponse::Consume,
            _ => HitResponse::Ignore,
        }
    }
}
