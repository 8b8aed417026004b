#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line driver for Starforge Nexus.
//!
//! Loads a configuration, replays scripted pointer clicks through the
//! two-click selection gesture and runs the simulation until it ends or the
//! tick limit is reached, printing ASCII frames along the way.

mod frame;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use starforge_nexus_core::{Command, SimulationConfig};
use starforge_nexus_simulation::{config, Simulation};
use starforge_nexus_system_selection::{cell_from_pointer, Selection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Side length of one grid cell in pointer pixels.
const CELL_SIZE_PX: f32 = 40.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Starforge Nexus simulation", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the random seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Pointer click in pixels (format: X,Y), applied in order before the first tick
    #[arg(long = "click", value_parser = parse_click)]
    clicks: Vec<(f32, f32)>,

    /// Print a frame every N ticks (0 prints only the first and last frame)
    #[arg(long, default_value_t = 0)]
    frame_every: u64,
}

fn parse_click(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but found '{value}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|error| format!("invalid x coordinate '{x}': {error}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|error| format!("invalid y coordinate '{y}': {error}"))?;
    Ok((x, y))
}

/// Entry point for the Starforge Nexus command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => config::from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let mut simulation =
        Simulation::new(&config).context("Configuration does not describe a playable board")?;
    println!("{}", simulation.welcome_banner());

    replay_clicks(&mut simulation, &args.clicks);
    print_frame(&simulation);

    for _ in 0..args.ticks {
        let outcome = simulation.tick();
        if outcome.is_terminal() {
            break;
        }
        let tick = simulation.snapshot().tick;
        if args.frame_every > 0 && tick % args.frame_every == 0 {
            print_frame(&simulation);
        }
    }

    print_frame(&simulation);
    info!(outcome = ?simulation.outcome(), "cli.finished");
    Ok(())
}

fn replay_clicks(simulation: &mut Simulation, clicks: &[(f32, f32)]) {
    let mut selection = Selection::new();
    let mut commands = Vec::new();

    for &(x, y) in clicks {
        let cell = cell_from_pointer(x, y, CELL_SIZE_PX, simulation.dimensions());
        selection.handle(cell, |cell| simulation.is_selectable(cell), &mut commands);

        for command in commands.drain(..) {
            if let Command::RequestConnection { from, to } = command {
                match simulation.request_connection(from, to) {
                    Ok(connection) => info!(?connection, "cli.connected"),
                    Err(reason) => warn!(?from, ?to, %reason, "cli.connection_rejected"),
                }
            }
        }
    }
}

fn print_frame(simulation: &Simulation) {
    let snapshot = simulation.snapshot();
    print!("{}", frame::render(&snapshot));
    println!("{}", frame::status_line(&snapshot));
}
