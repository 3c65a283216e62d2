pub use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

pub type Tick = u64;

/// Index into an [`AnimationSet`](crate::animation::AnimationSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimationId(pub usize);

/**
* The discrete set of named actions a player can trigger.
* Anything richer than this is the input collaborator's business.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    /// Paused by the player, can be resumed
    Paused,
    /// The character died, the simulation no longer advances
    GameOver,
    Quit,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::GameOver | RunState::Quit)
    }
}

/// Sub-rectangle of a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// What the render collaborator needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    pub animation: AnimationId,
    pub rect: FrameRect,
}
