use kiwi_core::{
    Action, Entity, InputEvent, RunState, SimConfig, Vec2, World,
    animation::AnimationSet,
    character::Character,
    config::CharacterParams,
};

fn config() -> SimConfig {
    SimConfig {
        seed: Some(0),
        ..Default::default()
    }
}

fn ground(x: f32, y: f32, w: f32, h: f32) -> Entity {
    Entity::ground(Vec2::new(x, y), Vec2::new(w, h), Vec2::ZERO, AnimationSet::EMPTY).unwrap()
}

fn player(x: f32, y: f32) -> Entity {
    let start = Vec2::new(x, y);
    Entity::character(
        start,
        Character::new(CharacterParams::default(), start),
        AnimationSet::EMPTY,
    )
    .unwrap()
}

fn character(world: &World) -> (&Entity, &Character) {
    let entity = world.character().unwrap();
    (entity, entity.as_character().unwrap())
}

#[test]
fn falls_onto_the_floor_and_rests() {
    let mut world = World::new(
        config(),
        AnimationSet::new(),
        vec![ground(-100.0, 150.0, 500.0, 30.0)],
        vec![player(100.0, 130.0)],
    )
    .unwrap();

    for _ in 0..50 {
        world.step();
    }
    // Gravity pulls it a little into the floor every tick, by at most one tick of force
    let height = CharacterParams::default().collision_size.y;
    let (entity, _) = character(&world);
    let sink = entity.position().y - (150.0 - height);
    assert!((0.0..0.33).contains(&sink), "sink = {sink}");

    // And the next collision pass puts it back on top
    world.resolve_collisions();
    let (entity, c) = character(&world);
    assert_eq!(entity.position(), Vec2::new(100.0, 150.0 - height));
    assert!(c.is_grounded());
    assert_eq!(c.force().y, 0.0);
}

#[test]
fn walking_off_an_edge_clears_grounded() {
    let mut world = World::new(
        config(),
        AnimationSet::new(),
        vec![ground(0.0, 150.0, 110.0, 30.0)],
        vec![player(100.0, 134.0)],
    )
    .unwrap();

    world.step();
    assert!(character(&world).1.is_grounded());

    world.handle_input(InputEvent::Pressed(Action::MoveRight));
    let mut left_ground = false;
    for _ in 0..40 {
        world.step();
        let (entity, c) = character(&world);
        if entity.shape().min().x > 110.0 {
            // No supporting overlap on the tick that follows
            world.step();
            assert!(!character(&world).1.is_grounded());
            left_ground = true;
            break;
        }
        assert!(c.force().x >= 0.0);
    }
    assert!(left_ground);
}

#[test]
fn walks_into_a_wall_and_stops() {
    let height = CharacterParams::default().collision_size.y;
    let width = CharacterParams::default().collision_size.x;
    let start = Vec2::new(100.0, 150.0 - height);
    let wall_x = start.x + width + 5.0;

    let mut world = World::new(
        config(),
        AnimationSet::new(),
        vec![
            ground(-100.0, 150.0, 500.0, 30.0),
            ground(wall_x, 120.0, 20.0, 30.0),
        ],
        vec![player(start.x, start.y)],
    )
    .unwrap();

    world.handle_input(InputEvent::Pressed(Action::MoveRight));
    for _ in 0..10 {
        world.step();
    }
    world.resolve_collisions();

    let (entity, c) = character(&world);
    assert_eq!(c.force().x, 0.0);
    assert_eq!(entity.shape().max().x, wall_x - 1.0);
    assert!(c.is_grounded());
    assert_eq!(world.state(), RunState::Running);
}

#[test]
fn jump_plays_sound_and_leaves_the_ground() {
    let mut world = World::new(
        config(),
        AnimationSet::new(),
        vec![ground(-100.0, 150.0, 500.0, 30.0)],
        vec![player(100.0, 134.0)],
    )
    .unwrap();
    world.drain_events();

    world.step();
    world.handle_input(InputEvent::Pressed(Action::Jump));
    world.step();
    world.handle_input(InputEvent::Released(Action::Jump));
    assert!(world.drain_events().contains(&kiwi_core::SimEvent::Jump));

    let mut peak = f32::MAX;
    for _ in 0..10 {
        world.step();
        peak = peak.min(character(&world).0.position().y);
    }
    assert!(peak < 134.0 - 5.0, "peak = {peak}");
}

#[test]
fn default_level_eventually_ends() {
    let level = kiwi_core::Level::default_level().unwrap();
    let mut world = World::from_level(config(), &level).unwrap();

    // Idle player: obstacles push it into the kill volume
    for _ in 0..20_000 {
        world.step();
        if world.state() == RunState::GameOver {
            break;
        }
    }
    assert_eq!(world.state(), RunState::GameOver);
    assert!(world.character().is_none());
}
