use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SimError},
    types::{AnimationId, FrameRect, UVec2},
};

/// A horizontal strip of equally sized frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnimation")]
pub struct Animation {
    frames: u32,
    texture_size: UVec2,
    loaded: bool,
}

/// Unchecked wire form, validated through [`Animation::new`].
#[derive(Deserialize)]
struct RawAnimation {
    frames: u32,
    texture_size: UVec2,
    loaded: bool,
}

impl TryFrom<RawAnimation> for Animation {
    type Error = SimError;

    fn try_from(raw: RawAnimation) -> Result<Self> {
        Animation::new(raw.frames, raw.texture_size, raw.loaded)
    }
}

impl Animation {
    pub fn new(frames: u32, texture_size: UVec2, loaded: bool) -> Result<Self> {
        if loaded && frames == 0 {
            return Err(SimError::EmptyLoadedAnimation);
        }
        Ok(Self {
            frames,
            texture_size,
            loaded,
        })
    }

    /// Animation of entities that are never drawn.
    pub fn empty() -> Self {
        Self {
            frames: 0,
            texture_size: UVec2::ZERO,
            loaded: false,
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn frame_rect(&self, frame: u32) -> Option<FrameRect> {
        if !self.loaded {
            return None;
        }
        let tile = self.texture_size.x / self.frames;
        Some(FrameRect {
            left: frame * tile,
            top: 0,
            width: tile,
            height: self.texture_size.y,
        })
    }
}

/// Animation table supplied by the asset collaborator.
/// Slot 0 always holds the empty animation.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    entries: Vec<(String, Animation)>,
}

impl AnimationSet {
    pub const EMPTY: AnimationId = AnimationId(0);

    pub fn new() -> Self {
        Self {
            entries: vec![("empty".to_string(), Animation::empty())],
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, animation: Animation) -> AnimationId {
        self.entries.push((name.into(), animation));
        AnimationId(self.entries.len() - 1)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.entries.get(id.0).map(|(_, a)| a)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        id.0 < self.entries.len()
    }

    pub fn id_of(&self, name: &str) -> Result<AnimationId> {
        self.entries
            .iter()
            .position(|(n, _)| n == name)
            .map(AnimationId)
            .ok_or_else(|| SimError::UnknownAnimationName(name.to_string()))
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-entity playback position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    id: AnimationId,
    frame: u32,
}

impl AnimationState {
    pub fn new(id: AnimationId) -> Self {
        Self { id, frame: 0 }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// One call, one frame. Cadence is decided by the caller.
    pub fn advance(&mut self, animations: &AnimationSet) {
        let frames = animations.get(self.id).map_or(0, Animation::frames);
        self.frame = if frames == 0 {
            0
        } else {
            (self.frame + 1) % frames
        };
    }

    pub fn play(&mut self, id: AnimationId) {
        self.id = id;
        self.frame = 0;
    }

    pub fn rect(&self, animations: &AnimationSet) -> Option<FrameRect> {
        animations.get(self.id)?.frame_rect(self.frame)
    }
}
