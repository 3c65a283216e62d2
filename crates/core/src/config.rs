use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SimError},
    types::Vec2,
};

/// Tuning of a run.
///
/// Every per-tick constant here is calibrated against `tick_rate = 36`.
/// Changing the rate only changes how fast the host clock drives ticks, the
/// physics itself stays expressed per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per second expected from the host clock
    pub tick_rate: u32,
    /// Animations advance once every `visual_divisor` ticks
    pub visual_divisor: u32,
    pub viewport: Vec2,
    /// Entities further than this outside the viewport are culled
    pub cull_margin: f32,
    pub gravity: f32,
    pub character: CharacterParams,
    pub spawner: SpawnerParams,
    /// Fixed seed for the spawner's random draws, random when absent
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 36,
            visual_divisor: 2,
            viewport: Vec2::new(320.0, 180.0),
            cull_margin: 100.0,
            gravity: 9.8,
            character: CharacterParams::default(),
            spawner: SpawnerParams::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| SimError::Level(e.to_string()))
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn is_out_of_bounds(&self, position: Vec2) -> bool {
        let m = self.cull_margin;
        position.x < -m
            || position.x > self.viewport.x + m
            || position.y < -m
            || position.y > self.viewport.y + m
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterParams {
    pub gravity_modifier: f32,
    pub air_resistance: f32,
    pub ground_resistance: f32,
    pub movement_speed: f32,
    pub jump_impulse: f32,
    pub collision_size: Vec2,
    pub collision_offset: Vec2,
}

impl Default for CharacterParams {
    fn default() -> Self {
        Self {
            gravity_modifier: 0.033,
            air_resistance: 0.5,
            ground_resistance: 0.1,
            movement_speed: 1.0,
            jump_impulse: 3.0,
            collision_size: Vec2::new(16.0, 16.0),
            collision_offset: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerParams {
    /// Percentage a draw must exceed for the tick to count toward a spawn
    pub spawn_threshold: u32,
    pub min_spawn_interval: f32,
    pub initial_ramp: f32,
    pub ramp_step: f32,
    /// Second draw below this picks the large obstacle
    pub large_below: u32,
    /// Second draw below this (and not large) picks the small obstacle
    pub small_below: u32,
    pub large: ObstacleKind,
    pub small: ObstacleKind,
    pub flying: ObstacleKind,
}

impl Default for SpawnerParams {
    fn default() -> Self {
        Self {
            spawn_threshold: 70,
            min_spawn_interval: 60.0,
            initial_ramp: 1.0,
            ramp_step: 0.001,
            large_below: 33,
            small_below: 66,
            large: ObstacleKind {
                size: Vec2::new(30.0, 30.0),
                spawn_offset: Vec2::ZERO,
            },
            small: ObstacleKind {
                size: Vec2::new(20.0, 20.0),
                spawn_offset: Vec2::new(0.0, 10.0),
            },
            flying: ObstacleKind {
                size: Vec2::new(20.0, 20.0),
                spawn_offset: Vec2::new(0.0, -20.0),
            },
        }
    }
}

/// Collision size of an obstacle variant and where it appears relative to the spawn origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleKind {
    pub size: Vec2,
    pub spawn_offset: Vec2,
}
