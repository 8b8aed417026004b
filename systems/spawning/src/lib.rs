#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting void spawn commands.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starforge_nexus_core::{CellCoord, Command, Event, SimulationConfig};

/// ChaCha stream reserved for spawn decisions; stream 0 places the starting nodes.
const SPAWN_STREAM: u64 = 1;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_probability: f64,
    population_cap: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from a per-tick probability, cap and seed.
    #[must_use]
    pub const fn new(spawn_probability: f64, population_cap: u32, rng_seed: u64) -> Self {
        Self {
            spawn_probability,
            population_cap,
            rng_seed,
        }
    }
}

impl From<&SimulationConfig> for Config {
    fn from(config: &SimulationConfig) -> Self {
        Self::new(
            config.void_spawn_probability,
            config.void_population_cap,
            config.rng_seed,
        )
    }
}

/// Pure system that rolls for a void spawn once per started tick.
#[derive(Debug)]
pub struct Spawning {
    spawn_probability: f64,
    population_cap: u32,
    rng: ChaCha8Rng,
    perimeter: Vec<CellCoord>,
    perimeter_dimensions: Option<(u32, u32)>,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        rng.set_stream(SPAWN_STREAM);
        Self {
            spawn_probability: config.spawn_probability,
            population_cap: config.population_cap,
            rng,
            perimeter: Vec::new(),
            perimeter_dimensions: None,
        }
    }

    /// Consumes events and the live void count to emit spawn commands.
    ///
    /// Each `Event::TickStarted` draws one roll. A successful roll below the
    /// population cap picks a uniformly random perimeter cell; the world
    /// decides whether that cell is free.
    pub fn handle(
        &mut self,
        events: &[Event],
        live_voids: usize,
        dimensions: (u32, u32),
        out: &mut Vec<Command>,
    ) {
        let mut live = live_voids;
        for event in events {
            if !matches!(event, Event::TickStarted { .. }) {
                continue;
            }

            let roll: f64 = self.rng.gen();
            if roll >= self.spawn_probability || live >= self.population_cap as usize {
                continue;
            }

            self.prepare_perimeter(dimensions);
            if let Some(&cell) = self.perimeter.choose(&mut self.rng) {
                out.push(Command::SpawnVoid { cell });
                live += 1;
            }
        }
    }

    fn prepare_perimeter(&mut self, dimensions: (u32, u32)) {
        if self.perimeter_dimensions == Some(dimensions) {
            return;
        }
        self.perimeter = perimeter_cells(dimensions.0, dimensions.1);
        self.perimeter_dimensions = Some(dimensions);
    }
}

/// Every cell on the four grid edges, each listed once.
fn perimeter_cells(columns: u32, rows: u32) -> Vec<CellCoord> {
    if columns == 0 || rows == 0 {
        return Vec::new();
    }

    let mut cells = Vec::new();
    for column in 0..columns {
        cells.push(CellCoord::new(column, 0));
        if rows > 1 {
            cells.push(CellCoord::new(column, rows - 1));
        }
    }
    for row in 1..rows.saturating_sub(1) {
        cells.push(CellCoord::new(0, row));
        if columns > 1 {
            cells.push(CellCoord::new(columns - 1, row));
        }
    }
    cells
}
