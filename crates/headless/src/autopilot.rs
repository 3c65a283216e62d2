use kiwi_core::{
    Action, Entity, EntityKind, InputEvent, World,
    character::Character,
};
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Move right for this many ticks at the start of the run
const WARMUP_TICKS: u64 = 10;
/// Horizontal gap under which an incoming obstacle triggers a jump
const LOOKAHEAD: f32 = 24.0;
const RANDOM_JUMP_CHANCE: f64 = 0.01;

/// Scripted player standing in for a keyboard.
pub struct Autopilot {
    rng: StdRng,
    ticks: u64,
    jump_held: bool,
}

impl Autopilot {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            // Keep its stream apart from the world's
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            ticks: 0,
            jump_held: false,
        }
    }

    /// Input events to apply before the next step.
    pub fn inputs(&mut self, world: &World) -> Vec<InputEvent> {
        let mut inputs = vec![];
        match self.ticks {
            0 => inputs.push(InputEvent::Pressed(Action::MoveRight)),
            WARMUP_TICKS => inputs.push(InputEvent::Released(Action::MoveRight)),
            _ => {}
        }
        self.ticks += 1;

        // Jumps are one tick taps
        if self.jump_held {
            self.jump_held = false;
            inputs.push(InputEvent::Released(Action::Jump));
            return inputs;
        }

        let Some(character) = world.character() else {
            return inputs;
        };
        let grounded = character.as_character().is_some_and(Character::is_grounded);
        if grounded && (obstacle_ahead(world, character) || self.rng.random_bool(RANDOM_JUMP_CHANCE)) {
            debug!("Autopilot jumps at tick {}", world.ticks());
            self.jump_held = true;
            inputs.push(InputEvent::Pressed(Action::Jump));
        }
        inputs
    }
}

fn obstacle_ahead(world: &World, character: &Entity) -> bool {
    let own = character.shape();
    world
        .statics()
        .iter()
        .filter(|e| matches!(e.kind(), EntityKind::Obstacle(_)))
        .any(|e| {
            let other = e.shape();
            let gap = other.min().x - own.max().x;
            (0.0..=LOOKAHEAD).contains(&gap)
                && other.min().y <= own.max().y
                && own.min().y <= other.max().y
        })
}

#[cfg(test)]
mod tests {
    use kiwi_core::{
        SimConfig, Vec2, animation::AnimationSet, config::CharacterParams, obstacle::Obstacle,
    };

    use super::*;

    fn world_with_obstacle(at: Vec2) -> World {
        let start = Vec2::new(100.0, 134.0);
        let player = Entity::character(
            start,
            Character::new(CharacterParams::default(), start),
            AnimationSet::EMPTY,
        )
        .unwrap();
        let floor = Entity::ground(
            Vec2::new(-100.0, 150.0),
            Vec2::new(500.0, 30.0),
            Vec2::ZERO,
            AnimationSet::EMPTY,
        )
        .unwrap();
        let obstacle = Entity::new(
            at,
            Vec2::new(20.0, 16.0),
            Vec2::ZERO,
            AnimationSet::EMPTY,
            EntityKind::Obstacle(Obstacle::new(0.0)),
        )
        .unwrap();
        let config = SimConfig {
            seed: Some(3),
            ..Default::default()
        };
        let mut world =
            World::new(config, AnimationSet::new(), vec![floor, obstacle], vec![player]).unwrap();
        // Land first
        world.step();
        world
    }

    #[test]
    fn holds_move_right_during_warmup() {
        let world = world_with_obstacle(Vec2::new(300.0, 134.0));
        let mut pilot = Autopilot::new(Some(0));
        let first = pilot.inputs(&world);
        assert_eq!(first.first(), Some(&InputEvent::Pressed(Action::MoveRight)));

        let released = (0..WARMUP_TICKS)
            .map(|_| pilot.inputs(&world))
            .position(|inputs| inputs.contains(&InputEvent::Released(Action::MoveRight)));
        assert_eq!(released, Some(WARMUP_TICKS as usize - 1));
    }

    #[test]
    fn taps_jump_in_front_of_an_obstacle() {
        let world = world_with_obstacle(Vec2::new(130.0, 134.0));
        let mut pilot = Autopilot::new(Some(0));
        assert!(pilot.inputs(&world).contains(&InputEvent::Pressed(Action::Jump)));
        assert!(pilot.inputs(&world).contains(&InputEvent::Released(Action::Jump)));
    }

    #[test]
    fn ignores_obstacles_overhead_or_behind() {
        let overhead = world_with_obstacle(Vec2::new(125.0, 100.0));
        let character = overhead.character().unwrap();
        assert!(!obstacle_ahead(&overhead, character));

        let behind = world_with_obstacle(Vec2::new(60.0, 134.0));
        let character = behind.character().unwrap();
        assert!(!obstacle_ahead(&behind, character));
    }
}
