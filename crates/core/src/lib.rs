//! Fixed-tick simulation core of a side-scrolling endless runner.
//!
//! The crate owns no window, clock, audio or asset loading. A host feeds it
//! [`InputEvent`]s, calls [`World::step`] at the configured tick rate, draws
//! [`World::sprites`] and plays the sounds named by [`World::drain_events`].

pub mod animation;
pub mod background;
pub mod character;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod level;
pub mod obstacle;
pub mod shape;
pub mod spawner;
pub mod types;
pub mod world;

pub use config::SimConfig;
pub use entity::{Entity, EntityKind};
pub use error::SimError;
pub use events::SimEvent;
pub use level::Level;
pub use types::{Action, InputEvent, RunState, Vec2};
pub use world::World;
