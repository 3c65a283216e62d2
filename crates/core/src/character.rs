//! Player-controlled body: forces, drag, jump and the push-out response.

use log::debug;

use crate::{
    config::CharacterParams,
    entity::{Contact, TickContext},
    events::SimEvent,
    shape::CollisionShape,
    types::{Action, Vec2},
};

#[derive(Debug, Clone)]
pub struct Character {
    params: CharacterParams,
    force: Vec2,
    /// Position before the last integration, tells where we came from
    last_position: Vec2,
    grounded: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub jumping: bool,
}

impl Character {
    pub fn new(params: CharacterParams, start: Vec2) -> Self {
        Self {
            params,
            force: Vec2::ZERO,
            last_position: start,
            grounded: false,
            moving_left: false,
            moving_right: false,
            jumping: false,
        }
    }

    pub fn params(&self) -> &CharacterParams {
        &self.params
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Flag transition from a key event. Returns false for actions that do not steer the character.
    pub fn set_action(&mut self, action: Action, held: bool) -> bool {
        match action {
            Action::MoveLeft => self.moving_left = held,
            Action::MoveRight => self.moving_right = held,
            Action::Jump => self.jumping = held,
            Action::Pause | Action::Quit => return false,
        }
        true
    }

    /// Vertical force only sticks while standing on something.
    fn add_force(&mut self, force: Vec2) {
        self.force.x += force.x;
        if self.grounded {
            self.force.y += force.y;
        }
    }

    pub(crate) fn logic_tick(&mut self, position: &mut Vec2, ctx: &mut TickContext) {
        let speed = self.params.movement_speed;
        if self.moving_right {
            self.add_force(Vec2::new(speed, 0.0));
        }
        if self.moving_left {
            self.add_force(Vec2::new(-speed, 0.0));
        }

        self.force.y += ctx.gravity * self.params.gravity_modifier;

        self.last_position = *position;
        *position += self.force;

        if self.grounded {
            self.force.x *= self.params.ground_resistance;
            if self.jumping {
                self.add_force(Vec2::new(0.0, -self.params.jump_impulse));
                ctx.events.push(SimEvent::Jump);
            }
        } else {
            self.force.x *= self.params.air_resistance;
        }
    }

    /// Pushes the character out of every contact, one after the other. A later
    /// contact may overwrite the correction of an earlier one.
    ///
    /// Returns true when one of the contacts is lethal.
    pub(crate) fn respond(
        &mut self,
        position: &mut Vec2,
        shape: &mut CollisionShape,
        contacts: &[Contact],
    ) -> bool {
        self.grounded = false;
        let mut killed = false;

        let size = shape.size();
        let offset = shape.offset();

        for Contact { shape: other } in contacts {
            if other.is_lethal() {
                killed = true;
            }

            // Distances are taken from the other shape's first corner, not its center
            let other_min = other.min();
            let last_min = self.last_position + offset;
            let distance = last_min - other_min;

            let self_top = last_min.y;
            let self_bottom = last_min.y + size.y;
            let other_top = other_min.y;
            let other_bottom = other_min.y + other.size().y;

            if self_bottom > other_top && self_top < other_bottom {
                // Was already level with it before moving: horizontal push
                self.force.x = 0.0;
                let x = if distance.x < 0.0 {
                    other_min.x - size.x - 1.0
                } else {
                    other_min.x + other.size().x + 1.0
                };
                position.x = x - offset.x;
            } else if distance.y < 0.0 {
                // Landing
                position.y = other_top - size.y - offset.y;
                self.grounded = true;
                if self.force.y > 0.0 {
                    self.force.y = 0.0;
                }
            } else {
                // Ceiling
                position.y = other.max().y + 1.0 - offset.y;
                if self.force.y < 0.0 {
                    self.force.y = 0.0;
                }
            }
            shape.update_world_corners(*position);
        }

        if killed {
            debug!("Character touched a lethal shape at {position:?}");
        }
        killed
    }
}
