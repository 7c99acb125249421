//! The world stage: live actors plus deferred spawn/despawn queues
//!
//! Actors are only ever added or removed in [`WorldStage::commit`], which the
//! frame driver calls once per frame after collisions are resolved. While
//! actors tick and while hits are dispatched, structural changes are appended
//! to the [`PendingQueue`], which is a separate borrow from the live set.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::actor::{Actor, ActorId, HitResponse, TickContext};
use super::collision::CollisionIndex;
use super::state::GameEvent;
use super::tick::FrameInput;
use crate::tuning::Tuning;

/// Spawns and despawns requested during the current frame
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    next_id: u32,
    adds: Vec<Actor>,
    removes: Vec<ActorId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle. Handles are never reused.
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build an actor with a fresh handle and queue it for addition
    pub fn spawn<F>(&mut self, build: F) -> ActorId
    where
        F: FnOnce(ActorId) -> Actor,
    {
        let id = self.allocate_id();
        let actor = build(id);
        debug_assert_eq!(actor.id(), id, "spawned actor must keep its allocated id");
        self.adds.push(actor);
        id
    }

    /// Queue a fully constructed actor for addition
    pub fn enqueue_add(&mut self, actor: Actor) {
        self.adds.push(actor);
    }

    /// Queue an actor for removal. Repeated requests in one frame are ignored.
    pub fn despawn(&mut self, id: ActorId) {
        if !self.removes.contains(&id) {
            self.removes.push(id);
        }
    }

    pub fn pending_adds(&self) -> &[Actor] {
        &self.adds
    }

    pub fn pending_removes(&self) -> &[ActorId] {
        &self.removes
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removes.is_empty()
    }
}

/// What a commit changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub added: usize,
    pub removed: usize,
}

/// Owner of every live actor
#[derive(Debug, Clone, Default)]
pub struct WorldStage {
    /// Live actors, iterated in handle order for determinism
    live: BTreeMap<ActorId, Actor>,
    queue: PendingQueue,
}

impl WorldStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, build: F) -> ActorId
    where
        F: FnOnce(ActorId) -> Actor,
    {
        self.queue.spawn(build)
    }

    pub fn enqueue_add(&mut self, actor: Actor) {
        self.queue.enqueue_add(actor);
    }

    pub fn enqueue_remove(&mut self, id: ActorId) {
        self.queue.despawn(id);
    }

    pub fn allocate_id(&mut self) -> ActorId {
        self.queue.allocate_id()
    }

    pub fn queue(&self) -> &PendingQueue {
        &self.queue
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.live.get(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.live.values()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Tick every live actor once, in handle order.
    ///
    /// Spawns and despawns requested here land in the pending queue, so the
    /// set being iterated never changes.
    pub fn tick_all(
        &mut self,
        dt: f32,
        paused: bool,
        input: &FrameInput,
        tuning: &Tuning,
        index: &mut CollisionIndex,
        events: &mut Vec<GameEvent>,
    ) {
        let mut ctx = TickContext {
            dt,
            paused,
            input,
            tuning,
            commands: &mut self.queue,
            index,
            events,
        };
        for actor in self.live.values_mut() {
            actor.tick(&mut ctx);
        }
    }

    /// Run collision tests and deliver hits to live actors.
    ///
    /// Returns the number of overlapping pairs.
    pub fn resolve_hits(&mut self, index: &CollisionIndex, events: &mut Vec<GameEvent>) -> usize {
        let WorldStage { live, queue } = self;
        index.resolve(|target, other| {
            // Probes come from actors that ticked this frame and nothing has
            // been removed since, so both lookups succeed
            let Some(other_class) = live.get(&other).map(Actor::class) else {
                return;
            };
            let Some(actor) = live.get_mut(&target) else {
                return;
            };

            let response = actor.receive_hit(other, other_class);
            events.push(GameEvent::Hit { target, other });

            if response == HitResponse::Consume {
                if let Some(consumed) = live.get_mut(&other) {
                    consumed.detach();
                }
                queue.despawn(other);
            }
        })
    }

    /// Apply the frame's queued removals, then its queued additions.
    ///
    /// Removing an id that is not live is a no-op. A spawn despawned in the
    /// same frame never becomes live. Both queues are empty afterwards.
    pub fn commit(&mut self, events: &mut Vec<GameEvent>) -> CommitReport {
        let removes = std::mem::take(&mut self.queue.removes);
        let adds = std::mem::take(&mut self.queue.adds);
        let mut report = CommitReport::default();

        for &id in &removes {
            if let Some(actor) = self.live.remove(&id) {
                actor.dispose();
                events.push(GameEvent::Despawned { id });
                report.removed += 1;
            }
        }

        for actor in adds {
            let id = actor.id();
            if removes.contains(&id) {
                log::trace!("Spawn of {:?} cancelled before it went live", id);
                continue;
            }
            match self.live.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(actor);
                    report.added += 1;
                }
                Entry::Occupied(_) => {
                    log::warn!("Actor {:?} is already live, ignoring duplicate add", id);
                }
            }
        }

        if report.added > 0 || report.removed > 0 {
            log::debug!(
                "Commit: +{} -{} ({} live)",
                report.added,
                report.removed,
                self.live.len()
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn stage_with_bullet() -> (WorldStage, ActorId) {
        let tuning = Tuning::default();
        let mut stage = WorldStage::new();
        let id = stage.spawn(|id| Actor::player_bullet(id, Vec2::new(10.0, 10.0), &tuning));
        stage.commit(&mut Vec::new());
        (stage, id)
    }

    #[test]
    fn test_spawn_is_deferred() {
        let mut stage = WorldStage::new();
        let id = stage.spawn(|id| Actor::background(id, Vec2::ZERO));

        assert!(!stage.contains(id));
        assert_eq!(stage.queue().pending_adds().len(), 1);

        let report = stage.commit(&mut Vec::new());
        assert_eq!(report, CommitReport { added: 1, removed: 0 });
        assert!(stage.contains(id));
        assert!(stage.queue().is_empty());
    }

    #[test]
    fn test_double_remove_is_idempotent() {
        let (mut stage, id) = stage_with_bullet();
        stage.enqueue_remove(id);
        stage.enqueue_remove(id);
        assert_eq!(stage.queue().pending_removes().len(), 1);

        let mut events = Vec::new();
        let report = stage.commit(&mut events);
        assert_eq!(report.removed, 1);
        assert!(!stage.contains(id));
        assert_eq!(events, vec![GameEvent::Despawned { id }]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut stage, id) = stage_with_bullet();
        stage.enqueue_remove(id);
        stage.commit(&mut Vec::new());

        // Stale handle from an earlier frame
        stage.enqueue_remove(id);
        let report = stage.commit(&mut Vec::new());
        assert_eq!(report, CommitReport::default());
        assert!(stage.is_empty());
    }

    #[test]
    fn test_remove_then_add_in_one_commit() {
        let (mut stage, old) = stage_with_bullet();
        stage.enqueue_remove(old);
        let new = stage.spawn(|id| Actor::background(id, Vec2::ZERO));

        let report = stage.commit(&mut Vec::new());
        assert_eq!(report, CommitReport { added: 1, removed: 1 });
        assert!(!stage.contains(old));
        assert!(stage.contains(new));
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_spawn_despawned_same_frame_never_lives() {
        let mut stage = WorldStage::new();
        let id = stage.spawn(|id| Actor::background(id, Vec2::ZERO));
        stage.enqueue_remove(id);

        let report = stage.commit(&mut Vec::new());
        assert_eq!(report, CommitReport::default());
        assert!(!stage.contains(id));
    }

    #[test]
    fn test_commit_clears_queues_when_empty() {
        let mut stage = WorldStage::new();
        stage.enqueue_remove(ActorId(42));
        stage.commit(&mut Vec::new());
        assert!(stage.queue().is_empty());
    }

    #[test]
    fn test_enqueue_prebuilt_actor() {
        let mut stage = WorldStage::new();
        let id = stage.allocate_id();
        stage.enqueue_add(Actor::background(id, Vec2::new(0.0, 128.0)));
        stage.enqueue_add(Actor::background(id, Vec2::new(0.0, 256.0)));

        let report = stage.commit(&mut Vec::new());
        assert_eq!(report.added, 1);
        assert_eq!(stage.get(id).unwrap().pos.y, 128.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = PendingQueue::new();
        let a = queue.allocate_id();
        let b = queue.allocate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_boss_hit_consumes_bullet() {
        let tuning = Tuning::default();
        let mut stage = WorldStage::new();
        let boss = stage.spawn(|id| Actor::boss(id, Vec2::new(300.0, 300.0), &tuning));
        let bullet = stage.spawn(|id| Actor::player_bullet(id, Vec2::new(300.0, 300.0), &tuning));
        stage.commit(&mut Vec::new());

        let mut index = CollisionIndex::new();
        let mut events = Vec::new();
        let input = crate::sim::FrameInput::default();
        stage.tick_all(0.0, false, &input, &tuning, &mut index, &mut events);
        assert_eq!(stage.resolve_hits(&index, &mut events), 1);

        assert_eq!(stage.get(boss).unwrap().damage, 1);
        assert!(!stage.get(bullet).unwrap().is_attached());
        assert_eq!(stage.queue().pending_removes(), &[bullet]);

        stage.commit(&mut events);
        assert!(!stage.contains(bullet));
        assert!(stage.contains(boss));
    }
}
