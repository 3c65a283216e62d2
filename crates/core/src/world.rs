use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::AnimationSet,
    background::Background,
    collision,
    config::SimConfig,
    entity::{Entity, TickContext},
    error::{Result, SimError},
    events::SimEvent,
    level::{Layout, Level},
    types::{Action, InputEvent, RunState, Sprite, Tick},
};

/// Owns both entity collections and advances them one fixed tick at a time.
pub struct World {
    config: SimConfig,
    animations: AnimationSet,
    /// Environment, obstacles and spawners
    statics: Vec<Entity>,
    /// Player-driven entities, exactly one character
    dynamics: Vec<Entity>,
    background: Background,
    rng: StdRng,
    state: RunState,
    ticks: Tick,
    visual_counter: u32,
    events: Vec<SimEvent>,
}

impl World {
    pub fn new(
        config: SimConfig,
        animations: AnimationSet,
        statics: Vec<Entity>,
        dynamics: Vec<Entity>,
    ) -> Result<Self> {
        if statics.iter().any(Entity::is_character) {
            return Err(SimError::MisplacedCharacter);
        }
        match dynamics.iter().filter(|e| e.is_character()).count() {
            0 => return Err(SimError::NoCharacter),
            1 => {}
            _ => return Err(SimError::MultipleCharacters),
        }
        for entity in statics.iter().chain(dynamics.iter()) {
            let id = entity.animation().id();
            if !animations.contains(id) {
                return Err(SimError::UnknownAnimation(id));
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "World ready: {} static and {} dynamic entities, {} ticks/s",
            statics.len(),
            dynamics.len(),
            config.tick_rate
        );

        Ok(Self {
            config,
            animations,
            statics,
            dynamics,
            background: Background::default(),
            rng,
            state: RunState::Running,
            ticks: 0,
            visual_counter: 0,
            events: vec![SimEvent::AmbientStart],
        })
    }

    pub fn from_level(config: SimConfig, level: &Level) -> Result<Self> {
        let Layout {
            animations,
            statics,
            dynamics,
        } = level.build(&config)?;
        Self::new(config, animations, statics, dynamics)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn statics(&self) -> &[Entity] {
        &self.statics
    }

    pub fn dynamics(&self) -> &[Entity] {
        &self.dynamics
    }

    /// None once the character has been swept after a game over.
    pub fn character(&self) -> Option<&Entity> {
        self.dynamics.iter().find(|e| e.is_character())
    }

    fn character_mut(&mut self) -> Option<&mut Entity> {
        self.dynamics.iter_mut().find(|e| e.is_character())
    }

    /// Adds an environment entity. It takes part in the next tick.
    pub fn insert_static(&mut self, entity: Entity) -> Result<()> {
        if entity.is_character() {
            return Err(SimError::MisplacedCharacter);
        }
        let id = entity.animation().id();
        if !self.animations.contains(id) {
            return Err(SimError::UnknownAnimation(id));
        }
        self.statics.push(entity);
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let (action, held) = match event {
            InputEvent::Pressed(action) => (action, true),
            InputEvent::Released(action) => (action, false),
        };

        match (action, held) {
            (Action::Quit, true) => {
                info!("Quit requested at tick {}", self.ticks);
                self.state = RunState::Quit;
            }
            (Action::Pause, true) => {
                self.state = match self.state {
                    RunState::Running => RunState::Paused,
                    RunState::Paused => RunState::Running,
                    terminal => terminal,
                };
                info!("Run state is now {:?}", self.state);
            }
            (Action::Quit | Action::Pause, false) => {}
            (action, held) => match self.character_mut().and_then(|e| e.as_character_mut()) {
                Some(character) => {
                    character.set_action(action, held);
                }
                None => warn!("Dropping {event:?}: no character"),
            },
        }
    }

    /// Advances the simulation by one tick. Does nothing unless running.
    pub fn step(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.ticks += 1;

        self.background.tick();
        self.resolve_collisions();
        self.logic_pass();
        self.cull();
        self.check_game_over();

        let removed = sweep(&mut self.statics) + sweep(&mut self.dynamics);
        if removed > 0 {
            debug!("Swept {removed} entities at tick {}", self.ticks);
        }

        self.visual_counter += 1;
        if self.visual_counter >= self.config.visual_divisor {
            self.visual_counter = 0;
            self.visual_pass();
        }
    }

    /// Collision phase alone: every dynamic entity against the whole static
    /// collection, on the positions left by the previous tick.
    ///
    /// [`World::step`] already runs it. Hosts must not call it between steps,
    /// contacts would be resolved twice in one tick.
    #[doc(hidden)]
    pub fn resolve_collisions(&mut self) {
        for entity in &mut self.dynamics {
            collision::resolve(entity, &self.statics);
        }
    }

    fn logic_pass(&mut self) {
        let mut spawned = Vec::new();
        {
            let mut ctx = TickContext {
                gravity: self.config.gravity,
                rng: &mut self.rng,
                spawned: &mut spawned,
                events: &mut self.events,
            };
            for entity in &mut self.statics {
                entity.logic_tick(&mut ctx);
            }
            for entity in &mut self.dynamics {
                entity.logic_tick(&mut ctx);
            }
        }
        self.statics.append(&mut spawned);
    }

    fn cull(&mut self) {
        let config = &self.config;
        for entity in self.statics.iter_mut().chain(self.dynamics.iter_mut()) {
            if config.is_out_of_bounds(entity.position()) {
                entity.mark_for_removal();
            }
        }
    }

    fn check_game_over(&mut self) {
        if !self.character().is_some_and(Entity::is_marked_for_removal) {
            return;
        }
        info!("Game over after {} ticks", self.ticks);
        self.state = RunState::GameOver;
        self.events.extend([
            SimEvent::Death,
            SimEvent::AmbientStop,
            SimEvent::GameOver { ticks: self.ticks },
        ]);
    }

    fn visual_pass(&mut self) {
        for entity in self.statics.iter_mut().chain(self.dynamics.iter_mut()) {
            entity.graphic_tick(&self.animations);
        }
    }

    /// Drawable entities in draw order, statics first.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.statics
            .iter()
            .chain(self.dynamics.iter())
            .filter_map(|e| {
                let rect = e.animation().rect(&self.animations)?;
                Some(Sprite {
                    position: e.position(),
                    animation: e.animation().id(),
                    rect,
                })
            })
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Drops marked entities, walking backward so indices stay valid. Survivors keep their order.
pub fn sweep(entities: &mut Vec<Entity>) -> usize {
    let mut removed = 0;
    for i in (0..entities.len()).rev() {
        if entities[i].is_marked_for_removal() {
            entities.remove(i);
            removed += 1;
        }
    }
    removed
}
