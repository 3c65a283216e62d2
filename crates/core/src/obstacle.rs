use crate::types::Vec2;

/// Passive entity scrolling toward the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    speed: f32,
}

impl Obstacle {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn logic_tick(&mut self, position: &mut Vec2) {
        position.x -= self.speed / 3.0;
    }
}
