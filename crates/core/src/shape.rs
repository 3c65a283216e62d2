//! Axis-aligned collision rectangles anchored to an owner position.

use crate::{
    error::{Result, SimError},
    types::{Axis, Vec2},
};

/// Corners in world space, clockwise from the top-left (minimum) corner.
pub type Corners = [Vec2; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionShape {
    offset: Vec2,
    size: Vec2,
    corners: Corners,
    /// Touching a lethal shape kills any character
    lethal: bool,
}

impl CollisionShape {
    pub fn new(size: Vec2, offset: Vec2, owner: Vec2) -> Result<Self> {
        if size.is_nan() || size.cmplt(Vec2::ZERO).any() {
            return Err(SimError::NegativeSize {
                x: size.x,
                y: size.y,
            });
        }

        let mut shape = Self {
            offset,
            size,
            corners: [Vec2::ZERO; 4],
            lethal: false,
        };
        shape.update_world_corners(owner);
        Ok(shape)
    }

    pub fn lethal(mut self, lethal: bool) -> Self {
        self.lethal = lethal;
        self
    }

    /// Must be called every time the owner moves, before anything reads the corners.
    pub fn update_world_corners(&mut self, owner: Vec2) {
        let min = owner + self.offset;
        let max = min + self.size;
        self.corners = [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ];
    }

    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    pub fn min(&self) -> Vec2 {
        self.corners[0]
    }

    pub fn max(&self) -> Vec2 {
        self.corners[2]
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_lethal(&self) -> bool {
        self.lethal
    }

    pub fn set_lethal(&mut self, lethal: bool) {
        self.lethal = lethal;
    }

    /// Projections on `axis` intersect, touching edges included.
    pub fn overlaps_axis(&self, other: &CollisionShape, axis: Axis) -> bool {
        axis.of(self.min()) <= axis.of(other.max()) && axis.of(other.min()) <= axis.of(self.max())
    }

    pub fn overlaps(&self, other: &CollisionShape) -> bool {
        self.overlaps_axis(other, Axis::X) && self.overlaps_axis(other, Axis::Y)
    }
}
