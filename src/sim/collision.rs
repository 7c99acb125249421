//! Typed circle collision between actor categories
//!
//! Actors register one probe per collision shape while they tick. After every
//! actor has ticked, [`CollisionIndex::resolve`] runs the three category pair
//! tests that matter in this game and reports each overlap to both owners.
//! The index is emptied after every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::ActorId;

/// Collision class of a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    PlayerProjectile,
    Boss,
    BossProjectile,
}

impl Category {
    pub const COUNT: usize = 4;

    #[inline]
    fn index(self) -> usize {
        match self {
            Category::Player => 0,
            Category::PlayerProjectile => 1,
            Category::Boss => 2,
            Category::BossProjectile => 3,
        }
    }
}

/// Pairs tested by `resolve`, in order. No other combination is ever tested.
pub const TESTED_PAIRS: [(Category, Category); 3] = [
    (Category::Boss, Category::Player),
    (Category::BossProjectile, Category::Player),
    (Category::PlayerProjectile, Category::Boss),
];

/// One circle registered for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub category: Category,
    /// Handle of the actor that registered the probe (lookup only)
    pub owner: ActorId,
    /// World-space center, taken after the owner's tick
    pub center: Vec2,
    pub radius: f32,
}

impl Probe {
    /// Strict circle overlap; touching circles do not collide
    #[inline]
    pub fn overlaps(&self, other: &Probe) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) < r * r
    }
}

/// Per-frame registry of probes, one sequence per category
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    entries: [Vec<Probe>; Category::COUNT],
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a probe to its category sequence
    #[inline]
    pub fn register(&mut self, probe: Probe) {
        self.entries[probe.category.index()].push(probe);
    }

    /// Probes registered so far this frame for one category, in tick order
    pub fn probes(&self, category: Category) -> &[Probe] {
        &self.entries[category.index()]
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Vec::is_empty)
    }

    /// Run every tested pair and report overlaps.
    ///
    /// For each overlapping pair `(a, b)` the callback fires twice, first as
    /// `on_hit(a.owner, b.owner)` and then as `on_hit(b.owner, a.owner)`.
    /// Probes sharing an owner never hit each other. Returns the number of
    /// overlapping pairs found.
    pub fn resolve<F>(&self, mut on_hit: F) -> usize
    where
        F: FnMut(ActorId, ActorId),
    {
        let mut pairs = 0;
        for (collider, collidee) in TESTED_PAIRS {
            pairs += collide_entries(self.probes(collider), self.probes(collidee), &mut on_hit);
        }
        pairs
    }

    /// Drop every probe; called once per frame after `resolve`
    pub fn clear(&mut self) {
        for entries in &mut self.entries {
            entries.clear();
        }
    }
}

fn collide_entries<F>(collider: &[Probe], collidee: &[Probe], on_hit: &mut F) -> usize
where
    F: FnMut(ActorId, ActorId),
{
    let mut pairs = 0;
    for a in collider {
        for b in collidee {
            if a.owner == b.owner {
                continue;
            }
            if a.overlaps(b) {
                log::trace!("{:?} {:?} <-> {:?} {:?}", a.category, a.owner, b.category, b.owner);
                on_hit(a.owner, b.owner);
                on_hit(b.owner, a.owner);
                pairs += 1;
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn probe(category: Category, owner: u32, x: f32, y: f32, radius: f32) -> Probe {
        Probe {
            category,
            owner: ActorId(owner),
            center: Vec2::new(x, y),
            radius,
        }
    }

    fn hits(index: &CollisionIndex) -> Vec<(ActorId, ActorId)> {
        let mut hits = Vec::new();
        index.resolve(|target, other| hits.push((target, other)));
        hits
    }

    #[test]
    fn test_overlap_radius_10_and_14() {
        let mut index = CollisionIndex::new();
        index.register(probe(Category::Boss, 1, 0.0, 0.0, 10.0));
        index.register(probe(Category::Player, 2, 20.0, 0.0, 14.0));

        assert_eq!(hits(&index), vec![(ActorId(1), ActorId(2)), (ActorId(2), ActorId(1))]);
    }

    #[test]
    fn test_no_overlap_at_distance_25() {
        let mut index = CollisionIndex::new();
        index.register(probe(Category::Boss, 1, 0.0, 0.0, 10.0));
        index.register(probe(Category::Player, 2, 25.0, 0.0, 14.0));

        assert!(hits(&index).is_empty());
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = probe(Category::Boss, 1, 0.0, 0.0, 10.0);
        let b = probe(Category::Player, 2, 24.0, 0.0, 14.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_same_owner_never_hits() {
        let mut index = CollisionIndex::new();
        // One actor with two shapes in paired categories, fully coincident
        index.register(probe(Category::Boss, 7, 5.0, 5.0, 30.0));
        index.register(probe(Category::Player, 7, 5.0, 5.0, 30.0));

        assert!(hits(&index).is_empty());
    }

    #[test]
    fn test_untested_pairs_ignored() {
        let mut index = CollisionIndex::new();
        // Player bullet over the player, boss bullet over the boss
        index.register(probe(Category::Player, 1, 0.0, 0.0, 14.0));
        index.register(probe(Category::PlayerProjectile, 2, 0.0, 0.0, 16.0));
        index.register(probe(Category::Boss, 3, 500.0, 0.0, 32.0));
        index.register(probe(Category::BossProjectile, 4, 500.0, 0.0, 3.0));
        // Two bullets of different sides on top of each other
        index.register(probe(Category::PlayerProjectile, 5, 200.0, 200.0, 16.0));
        index.register(probe(Category::BossProjectile, 6, 200.0, 200.0, 3.0));

        assert!(hits(&index).is_empty());
    }

    #[test]
    fn test_pair_order() {
        let mut index = CollisionIndex::new();
        index.register(probe(Category::Player, 1, 0.0, 0.0, 14.0));
        index.register(probe(Category::Boss, 2, 0.0, 0.0, 32.0));
        index.register(probe(Category::BossProjectile, 3, 0.0, 0.0, 3.0));
        index.register(probe(Category::PlayerProjectile, 4, 0.0, 0.0, 16.0));

        let hits = hits(&index);
        assert_eq!(
            hits,
            vec![
                // Boss x Player
                (ActorId(2), ActorId(1)),
                (ActorId(1), ActorId(2)),
                // BossProjectile x Player
                (ActorId(3), ActorId(1)),
                (ActorId(1), ActorId(3)),
                // PlayerProjectile x Boss
                (ActorId(4), ActorId(2)),
                (ActorId(2), ActorId(4)),
            ]
        );
    }

    #[test]
    fn test_clear_empties_every_category() {
        let mut index = CollisionIndex::new();
        index.register(probe(Category::Player, 1, 0.0, 0.0, 14.0));
        index.register(probe(Category::BossProjectile, 2, 0.0, 0.0, 3.0));
        assert_eq!(index.len(), 2);

        index.clear();
        assert!(index.is_empty());
        assert!(hits(&index).is_empty());
    }

    #[test]
    fn test_resolve_counts_pairs() {
        let mut index = CollisionIndex::new();
        index.register(probe(Category::Player, 1, 0.0, 0.0, 14.0));
        for i in 0..3 {
            index.register(probe(Category::BossProjectile, 10 + i, 0.0, 0.0, 3.0));
        }
        assert_eq!(index.resolve(|_, _| {}), 3);
    }

    proptest! {
        #[test]
        fn prop_hits_are_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            ra in 1.0f32..50.0, rb in 1.0f32..50.0,
        ) {
            let mut index = CollisionIndex::new();
            index.register(probe(Category::PlayerProjectile, 1, ax, ay, ra));
            index.register(probe(Category::Boss, 2, bx, by, rb));

            let hits = hits(&index);
            let distance_sq = Vec2::new(ax, ay).distance_squared(Vec2::new(bx, by));
            let expected = distance_sq < (ra + rb) * (ra + rb);
            if expected {
                prop_assert_eq!(hits, vec![(ActorId(1), ActorId(2)), (ActorId(2), ActorId(1))]);
            } else {
                prop_assert!(hits.is_empty());
            }
        }

        #[test]
        fn prop_self_pairs_never_fire(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            ra in 0.5f32..50.0, rb in 0.5f32..50.0,
            owner in 0u32..1000,
        ) {
            let mut index = CollisionIndex::new();
            index.register(probe(Category::BossProjectile, owner, x, y, ra));
            index.register(probe(Category::Player, owner, x, y, rb));
            prop_assert!(hits(&index).is_empty());
        }
    }
}
