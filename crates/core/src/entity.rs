use log::debug;
use rand::RngCore;

use crate::{
    animation::{AnimationSet, AnimationState},
    character::Character,
    error::Result,
    events::SimEvent,
    obstacle::Obstacle,
    shape::CollisionShape,
    spawner::Spawner,
    types::{AnimationId, Vec2},
};

/// Closed set of entity variants. The world dispatches on it with `match`.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Immovable collider: floors, ceilings, kill volumes
    Ground,
    Character(Box<Character>),
    Obstacle(Obstacle),
    Spawner(Box<Spawner>),
}

/// What the logic tick may touch besides the entity itself.
pub struct TickContext<'a> {
    pub gravity: f32,
    pub rng: &'a mut dyn RngCore,
    /// Spawned entities wait here until the current pass is over
    pub spawned: &'a mut Vec<Entity>,
    pub events: &'a mut Vec<SimEvent>,
}

/// Read-only snapshot of an entity overlapping the one being resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub shape: CollisionShape,
}

impl From<&Entity> for Contact {
    fn from(entity: &Entity) -> Self {
        Contact {
            shape: *entity.shape(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    position: Vec2,
    shape: CollisionShape,
    animation: AnimationState,
    /// Debug indicator, set when the last collision query found something
    colliding: bool,
    marked_for_removal: bool,
    kind: EntityKind,
}

impl Entity {
    pub fn new(
        position: Vec2,
        size: Vec2,
        offset: Vec2,
        animation: AnimationId,
        kind: EntityKind,
    ) -> Result<Self> {
        let shape = CollisionShape::new(size, offset, position)?;
        Ok(Self::from_shape(position, shape, animation, kind))
    }

    /// Builds from an already validated shape, re-anchored at `position`.
    pub fn from_shape(
        position: Vec2,
        mut shape: CollisionShape,
        animation: AnimationId,
        kind: EntityKind,
    ) -> Self {
        shape.update_world_corners(position);
        Self {
            position,
            shape,
            animation: AnimationState::new(animation),
            colliding: false,
            marked_for_removal: false,
            kind,
        }
    }

    pub fn ground(position: Vec2, size: Vec2, offset: Vec2, animation: AnimationId) -> Result<Self> {
        Self::new(position, size, offset, animation, EntityKind::Ground)
    }

    pub fn character(position: Vec2, character: Character, animation: AnimationId) -> Result<Self> {
        let size = character.params().collision_size;
        let offset = character.params().collision_offset;
        Self::new(
            position,
            size,
            offset,
            animation,
            EntityKind::Character(Box::new(character)),
        )
    }

    pub fn with_lethal(mut self, lethal: bool) -> Self {
        self.shape.set_lethal(lethal);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the entity and keeps its shape in sync.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.shape.update_world_corners(position);
    }

    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationState {
        &mut self.animation
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    /// Removal is one-way: there is no way to unmark an entity.
    pub fn mark_for_removal(&mut self) {
        if !self.marked_for_removal {
            debug!("Entity at {:?} marked for removal", self.position);
        }
        self.marked_for_removal = true;
    }

    pub fn as_character(&self) -> Option<&Character> {
        match &self.kind {
            EntityKind::Character(c) => Some(c.as_ref()),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut Character> {
        match &mut self.kind {
            EntityKind::Character(c) => Some(c.as_mut()),
            _ => None,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, EntityKind::Character(_))
    }

    pub fn logic_tick(&mut self, ctx: &mut TickContext) {
        match &mut self.kind {
            EntityKind::Ground => {}
            EntityKind::Character(c) => c.logic_tick(&mut self.position, ctx),
            EntityKind::Obstacle(o) => o.logic_tick(&mut self.position),
            EntityKind::Spawner(s) => s.logic_tick(ctx),
        }
        self.shape.update_world_corners(self.position);
    }

    pub fn graphic_tick(&mut self, animations: &AnimationSet) {
        self.animation.advance(animations);
    }

    /// Receives every overlapping entity of this tick in one go.
    pub fn on_collision(&mut self, contacts: &[Contact]) {
        self.colliding = !contacts.is_empty();

        if let EntityKind::Character(c) = &mut self.kind {
            let killed = c.respond(&mut self.position, &mut self.shape, contacts);
            if killed {
                self.mark_for_removal();
            }
        }
    }
}
