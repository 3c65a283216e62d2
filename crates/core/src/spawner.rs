//! Invisible entity feeding the static collection with obstacles.
//!
//! The spawner never touches the collection it lives in. New obstacles go to
//! [`TickContext::spawned`] and the world merges them once its pass is done,
//! so they are not ticked on the tick that created them.

use log::debug;
use rand::Rng;

use crate::{
    config::{ObstacleKind, SpawnerParams},
    entity::{Entity, EntityKind, TickContext},
    error::Result,
    obstacle::Obstacle,
    shape::CollisionShape,
    types::{AnimationId, Vec2},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Large,
    Small,
    Flying,
}

/// Animations worn by each obstacle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantAnimations {
    pub small: AnimationId,
    pub large: AnimationId,
    pub flying: AnimationId,
}

#[derive(Debug, Clone)]
struct Prototype {
    shape: CollisionShape,
    spawn_offset: Vec2,
    animation: AnimationId,
}

impl Prototype {
    fn new(kind: &ObstacleKind, animation: AnimationId) -> Result<Self> {
        Ok(Self {
            shape: CollisionShape::new(kind.size, Vec2::ZERO, Vec2::ZERO)?,
            spawn_offset: kind.spawn_offset,
            animation,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    params: SpawnerParams,
    origin: Vec2,
    /// Counts only ticks whose first draw beat the threshold
    ticks_since_spawn: u32,
    speed_ramp: f32,
    large: Prototype,
    small: Prototype,
    flying: Prototype,
}

impl Spawner {
    pub fn new(params: SpawnerParams, origin: Vec2, animations: VariantAnimations) -> Result<Self> {
        Ok(Self {
            large: Prototype::new(&params.large, animations.large)?,
            small: Prototype::new(&params.small, animations.small)?,
            flying: Prototype::new(&params.flying, animations.flying)?,
            speed_ramp: params.initial_ramp,
            ticks_since_spawn: 0,
            origin,
            params,
        })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn speed_ramp(&self) -> f32 {
        self.speed_ramp
    }

    pub fn ticks_since_spawn(&self) -> u32 {
        self.ticks_since_spawn
    }

    /// Minimum count the spawn counter must exceed. Shrinks as the ramp grows.
    pub fn spawn_interval(&self) -> f32 {
        self.params.min_spawn_interval / self.speed_ramp
    }

    pub(crate) fn logic_tick(&mut self, ctx: &mut TickContext) {
        let chance: u32 = ctx.rng.random_range(0..100);
        let rng = &mut *ctx.rng;
        if let Some(variant) = self.advance(chance, || rng.random_range(0..100)) {
            ctx.spawned.push(self.build(variant));
        }
    }

    /// One step of the schedule given the tick's first draw. `roll` is only
    /// drawn when a spawn goes ahead.
    fn advance(&mut self, chance: u32, roll: impl FnOnce() -> u32) -> Option<Variant> {
        self.speed_ramp += self.params.ramp_step;

        if chance <= self.params.spawn_threshold {
            return None;
        }

        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn as f32 <= self.spawn_interval() {
            return None;
        }
        self.ticks_since_spawn = 0;

        let roll = roll();
        let variant = if roll < self.params.large_below {
            Variant::Large
        } else if roll < self.params.small_below {
            Variant::Small
        } else {
            Variant::Flying
        };
        Some(variant)
    }

    fn build(&self, variant: Variant) -> Entity {
        let prototype = match variant {
            Variant::Large => &self.large,
            Variant::Small => &self.small,
            Variant::Flying => &self.flying,
        };
        let position = self.origin + prototype.spawn_offset;
        debug!(
            "Spawning {variant:?} obstacle at {position:?} with speed {}",
            self.speed_ramp
        );

        Entity::from_shape(
            position,
            prototype.shape,
            prototype.animation,
            EntityKind::Obstacle(Obstacle::new(self.speed_ramp)),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{RngCore, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::animation::AnimationSet;

    fn spawner() -> Spawner {
        let animations = VariantAnimations {
            small: AnimationSet::EMPTY,
            large: AnimationSet::EMPTY,
            flying: AnimationSet::EMPTY,
        };
        Spawner::new(SpawnerParams::default(), Vec2::new(320.0, 120.0), animations).unwrap()
    }

    fn run(spawner: &mut Spawner, rng: &mut dyn RngCore, spawned: &mut Vec<Entity>) {
        let mut events = vec![];
        let mut ctx = TickContext {
            gravity: 9.8,
            rng,
            spawned,
            events: &mut events,
        };
        spawner.logic_tick(&mut ctx);
    }

    #[test]
    fn ramp_strictly_increases() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawned = vec![];
        let mut last = s.speed_ramp();
        for _ in 0..500 {
            run(&mut s, &mut rng, &mut spawned);
            assert!(s.speed_ramp() > last);
            last = s.speed_ramp();
        }
    }

    #[test]
    fn spawns_respect_interval() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(42);
        let mut spawned = vec![];
        let mut since_last = 0u32;
        let mut spawns = 0;

        for _ in 0..5000 {
            since_last += 1;
            let before = spawned.len();
            run(&mut s, &mut rng, &mut spawned);
            if spawned.len() > before {
                assert!(since_last as f32 > s.spawn_interval());
                assert_eq!(s.ticks_since_spawn(), 0);
                since_last = 0;
                spawns += 1;
            }
        }
        assert!(spawns > 0);
        // Spawned obstacles never exceed one per tick
        assert!(spawned.len() == spawns);
    }

    #[test]
    fn draws_at_threshold_never_count() {
        let mut s = spawner();
        for _ in 0..200 {
            assert_eq!(s.advance(70, || unreachable!()), None);
        }
        assert_eq!(s.ticks_since_spawn(), 0);
    }

    #[test]
    fn counter_must_exceed_interval() {
        let mut s = spawner();
        // The interval shrinks along the way: 56 < 60 / 1.056 but 57 > 60 / 1.057
        for _ in 0..56 {
            assert_eq!(s.advance(99, || unreachable!()), None);
        }
        assert_eq!(s.ticks_since_spawn(), 56);
        assert_eq!(s.advance(99, || 0), Some(Variant::Large));
        assert_eq!(s.ticks_since_spawn(), 0);
    }

    #[test]
    fn variants_follow_second_draw() {
        let cases = [
            (0, Variant::Large),
            (32, Variant::Large),
            (33, Variant::Small),
            (65, Variant::Small),
            (66, Variant::Flying),
            (99, Variant::Flying),
        ];
        for (roll, expected) in cases {
            let mut s = spawner();
            s.ticks_since_spawn = 60;
            assert_eq!(s.advance(71, || roll), Some(expected), "roll {roll}");
        }
    }

    #[test]
    fn built_obstacles_carry_ramp_and_layout() {
        let s = spawner();
        let cases = [
            (Variant::Large, Vec2::new(320.0, 120.0), 30.0),
            (Variant::Small, Vec2::new(320.0, 130.0), 20.0),
            (Variant::Flying, Vec2::new(320.0, 100.0), 20.0),
        ];
        for (variant, position, height) in cases {
            let obstacle = s.build(variant);
            assert_eq!(obstacle.position(), position);
            assert_eq!(obstacle.shape().min(), position);
            assert_eq!(obstacle.shape().size().y, height);
            match obstacle.kind() {
                EntityKind::Obstacle(o) => assert_eq!(o.speed(), s.speed_ramp()),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_variant_size_is_rejected() {
        let mut params = SpawnerParams::default();
        params.flying.size = Vec2::new(-1.0, 20.0);
        let animations = VariantAnimations {
            small: AnimationSet::EMPTY,
            large: AnimationSet::EMPTY,
            flying: AnimationSet::EMPTY,
        };
        assert!(Spawner::new(params, Vec2::ZERO, animations).is_err());
    }
}
