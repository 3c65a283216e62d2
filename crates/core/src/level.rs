//! Level layout as delivered by the asset collaborator.

use serde::{Deserialize, Serialize};

use crate::{
    animation::{Animation, AnimationSet},
    character::Character,
    config::SimConfig,
    entity::{Entity, EntityKind},
    error::{Result, SimError},
    spawner::{Spawner, VariantAnimations},
    types::{AnimationId, UVec2, Vec2},
};

const DEFAULT_LEVEL: &str = include_str!("../levels/default.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub animations: Vec<AnimationDef>,
    pub player: PlayerDef,
    /// In collision priority order: later entries win when several overlap
    pub statics: Vec<StaticDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDef {
    pub name: String,
    pub frames: u32,
    pub texture_size: UVec2,
    #[serde(default = "loaded_by_default")]
    pub loaded: bool,
}

fn loaded_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub position: Vec2,
    pub animation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaticDef {
    Ground {
        position: Vec2,
        size: Vec2,
        #[serde(default)]
        offset: Vec2,
        #[serde(default)]
        animation: Option<String>,
        #[serde(default)]
        lethal: bool,
    },
    Spawner {
        position: Vec2,
        size: Vec2,
        #[serde(default)]
        offset: Vec2,
        origin: Vec2,
        small: String,
        large: String,
        flying: String,
    },
}

/// Everything a world is made of, ready to be handed over.
pub struct Layout {
    pub animations: AnimationSet,
    pub statics: Vec<Entity>,
    pub dynamics: Vec<Entity>,
}

impl Level {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| SimError::Level(e.to_string()))
    }

    /// The stock run layout: floor, ceiling, spawner and the kill volume on the left.
    pub fn default_level() -> Result<Self> {
        Self::from_json(DEFAULT_LEVEL)
    }

    pub fn animation_set(&self) -> Result<AnimationSet> {
        let mut set = AnimationSet::new();
        for def in &self.animations {
            let animation = Animation::new(def.frames, def.texture_size, def.loaded)?;
            set.insert(def.name.clone(), animation);
        }
        Ok(set)
    }

    pub fn build(&self, config: &SimConfig) -> Result<Layout> {
        let animations = self.animation_set()?;
        let lookup = |name: &Option<String>| -> Result<AnimationId> {
            match name {
                Some(name) => animations.id_of(name),
                None => Ok(AnimationSet::EMPTY),
            }
        };

        let mut statics = Vec::with_capacity(self.statics.len());
        for def in &self.statics {
            let entity = match def {
                StaticDef::Ground {
                    position,
                    size,
                    offset,
                    animation,
                    lethal,
                } => Entity::ground(*position, *size, *offset, lookup(animation)?)?.with_lethal(*lethal),
                StaticDef::Spawner {
                    position,
                    size,
                    offset,
                    origin,
                    small,
                    large,
                    flying,
                } => {
                    let variants = VariantAnimations {
                        small: animations.id_of(small)?,
                        large: animations.id_of(large)?,
                        flying: animations.id_of(flying)?,
                    };
                    let spawner = Spawner::new(config.spawner.clone(), *origin, variants)?;
                    Entity::new(
                        *position,
                        *size,
                        *offset,
                        AnimationSet::EMPTY,
                        EntityKind::Spawner(Box::new(spawner)),
                    )?
                }
            };
            statics.push(entity);
        }

        let start = self.player.position;
        let player = Entity::character(
            start,
            Character::new(config.character.clone(), start),
            lookup(&self.player.animation)?,
        )?;

        Ok(Layout {
            animations,
            statics,
            dynamics: vec![player],
        })
    }
}
