//! Tunable constants that shape a simulation run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Named parameters for a simulation run.
///
/// Defaults reproduce the classic 20×15 board: 50 energy, connections costing
/// 10, five starting nodes and at most five voids spawning with a 2% chance
/// per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of grid columns.
    pub grid_columns: u32,
    /// Number of grid rows.
    pub grid_rows: u32,
    /// Energy available in the pool when the simulation starts.
    pub initial_energy: u32,
    /// Energy deducted for every successful connection.
    pub connection_cost: u32,
    /// Number of nodes scattered across the grid interior at setup.
    pub initial_node_count: u32,
    /// Probability that a spawn is attempted on a given tick.
    pub void_spawn_probability: f64,
    /// Maximum number of voids alive at once.
    pub void_population_cap: u32,
    /// Seed for every random stream used by the simulation.
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_columns: 20,
            grid_rows: 15,
            initial_energy: 50,
            connection_cost: 10,
            initial_node_count: 5,
            void_spawn_probability: 0.02,
            void_population_cap: 5,
            rng_seed: 0x5ea7_f0e9_e11a_0001,
        }
    }
}

impl SimulationConfig {
    /// Cell that hosts the core: the centre of the grid, rounded down.
    #[must_use]
    pub const fn core_cell(&self) -> CellCoord {
        CellCoord::new(self.grid_columns / 2, self.grid_rows / 2)
    }

    /// Number of interior cells, excluding the core, available to starting nodes.
    #[must_use]
    pub fn free_interior_cells(&self) -> u64 {
        let columns = u64::from(self.grid_columns.saturating_sub(2));
        let rows = u64::from(self.grid_rows.saturating_sub(2));
        (columns * rows).saturating_sub(1)
    }

    /// Checks that the parameters describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_columns < 3 || self.grid_rows < 3 {
            return Err(ConfigError::GridTooSmall {
                columns: self.grid_columns,
                rows: self.grid_rows,
            });
        }

        if !(0.0..=1.0).contains(&self.void_spawn_probability) {
            return Err(ConfigError::SpawnProbabilityOutOfRange(
                self.void_spawn_probability,
            ));
        }

        let available = self.free_interior_cells();
        if u64::from(self.initial_node_count) >= available {
            return Err(ConfigError::InsufficientFreeCells {
                requested: self.initial_node_count,
                available,
            });
        }

        Ok(())
    }
}

/// Reasons a configuration or explicit node layout is unusable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The grid has no interior for nodes to occupy.
    #[error("grid of {columns}x{rows} cells is too small, need at least 3x3")]
    GridTooSmall {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The spawn probability is not a probability.
    #[error("void spawn probability {0} is outside 0..=1")]
    SpawnProbabilityOutOfRange(f64),
    /// Random placement would not terminate on a grid this crowded.
    #[error("cannot place {requested} starting nodes into {available} free interior cells")]
    InsufficientFreeCells {
        /// Requested node count.
        requested: u32,
        /// Free interior cells on the grid.
        available: u64,
    },
    /// An explicit layout names a cell outside the grid.
    #[error("layout node {0:?} lies outside the grid")]
    NodeOutOfBounds(CellCoord),
    /// An explicit layout puts a node on the core.
    #[error("layout node {0:?} overlaps the core")]
    NodeOnCore(CellCoord),
    /// An explicit layout lists the same cell twice.
    #[error("layout lists node {0:?} more than once")]
    DuplicateNode(CellCoord),
}
