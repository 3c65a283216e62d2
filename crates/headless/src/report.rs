use kiwi_core::{RunState, SimEvent, World, types::Tick};
use log::*;
use serde::Serialize;

/// Stands in for the audio and render collaborators: logs what they would
/// play and draw, and keeps enough to summarize the run.
#[derive(Debug, Default)]
pub struct Report {
    jumps: u32,
    game_over_at: Option<Tick>,
    peak_sprites: usize,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub ticks: Tick,
    pub state: RunState,
    pub jumps: u32,
    pub game_over_at: Option<Tick>,
    pub peak_sprites: usize,
}

impl Report {
    pub fn record(&mut self, world: &World, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::AmbientStart => info!("Ambient sound on"),
                SimEvent::AmbientStop => info!("Ambient sound off"),
                SimEvent::Jump => {
                    self.jumps += 1;
                    debug!("Jump sound at tick {}", world.ticks());
                }
                SimEvent::Death => info!("Death sound"),
                SimEvent::GameOver { ticks } => {
                    info!("Run over after {ticks} ticks");
                    self.game_over_at = Some(*ticks);
                }
            }
        }

        let sprites = world.sprites();
        self.peak_sprites = self.peak_sprites.max(sprites.len());
        let background = world.background();
        trace!(
            "Frame {}: {} sprites, background at {} moving {:.3}",
            world.ticks(),
            sprites.len(),
            background.texture_left(),
            background.speed()
        );
    }

    pub fn finish(self, world: &World) -> Summary {
        Summary {
            ticks: world.ticks(),
            state: world.state(),
            jumps: self.jumps,
            game_over_at: self.game_over_at,
            peak_sprites: self.peak_sprites,
        }
    }
}
