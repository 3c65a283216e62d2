/// Scrolling phase of the repeated background texture. Purely cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Background {
    speed: f32,
    phase: f32,
}

impl Background {
    const ACCELERATION: f32 = 0.001;

    pub fn tick(&mut self) {
        self.speed += Self::ACCELERATION;
        self.phase += self.speed;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Left edge of the texture rect to draw, in whole pixels.
    pub fn texture_left(&self) -> u32 {
        self.phase as u32
    }
}
