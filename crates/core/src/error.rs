use thiserror::Error;

use crate::types::AnimationId;

/// Invariant violations detected while building entities or loading a level.
/// The tick itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("collision size must not be negative, got ({x}, {y})")]
    NegativeSize { x: f32, y: f32 },
    #[error("animation is marked loaded but has no frames")]
    EmptyLoadedAnimation,
    #[error("unknown animation {0:?}")]
    UnknownAnimation(AnimationId),
    #[error("unknown animation name {0:?}")]
    UnknownAnimationName(String),
    #[error("the dynamic collection holds no character")]
    NoCharacter,
    #[error("only one character is allowed per world")]
    MultipleCharacters,
    #[error("character entities belong to the dynamic collection")]
    MisplacedCharacter,
    #[error("invalid level: {0}")]
    Level(String),
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
