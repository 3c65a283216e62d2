use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use kiwi_core::{InputEvent, Level, SimConfig, World};
use log::*;

use crate::{autopilot::Autopilot, clock::FixedClock, report::Report};

mod autopilot;
mod clock;
mod logging;
mod report;

/// Runs the endless runner without a window, driven by an autopilot
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level layout as JSON, the built-in layout when absent
    #[arg(long)]
    level: Option<PathBuf>,

    /// Simulation tuning as JSON, defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for both the world and the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if the run goes on
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Sleep between ticks to match the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read config {}", path.display()))?;
            SimConfig::from_json(&json).context("Invalid config")?
        }
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let level = match &args.level {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read level {}", path.display()))?;
            Level::from_json(&json).with_context(|| format!("Invalid level {}", path.display()))?
        }
        None => Level::default_level().context("Built-in level is broken")?,
    };

    let mut clock = args.realtime.then(|| FixedClock::new(config.tick_duration()));
    let mut autopilot = Autopilot::new(config.seed);
    let mut world = World::from_level(config, &level).context("Could not build the world")?;
    let mut report = Report::default();

    info!("Running for at most {} ticks", args.ticks);
    while world.ticks() < args.ticks && !world.state().is_terminal() {
        for event in autopilot.inputs(&world) {
            apply(&mut world, event);
        }
        world.step();
        let events = world.drain_events();
        report.record(&world, &events);

        if let Some(clock) = clock.as_mut() {
            clock.wait();
        }
    }

    let summary = report.finish(&world);
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn apply(world: &mut World, event: InputEvent) {
    trace!("Input {event:?} at tick {}", world.ticks());
    world.handle_input(event);
}
