#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Starforge Nexus engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views, and respond exclusively with new command batches.

mod config;

pub use config::{ConfigError, SimulationConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Starforge Nexus.";

/// Energy level carried by a node while it is reachable from the core.
pub const POWERED_ENERGY: u32 = 100;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by one discrete tick.
    Tick,
    /// Requests a connection between two grid cells.
    RequestConnection {
        /// Cell selected first by the player.
        from: CellCoord,
        /// Cell selected second by the player.
        to: CellCoord,
    },
    /// Requests that a void be spawned at the provided perimeter cell.
    SpawnVoid {
        /// Cell the void should appear in.
        cell: CellCoord,
    },
    /// Requests that a void advance by the provided per-axis step.
    StepVoid {
        /// Identifier of the void attempting to move.
        void_id: VoidId,
        /// Step applied independently on each axis.
        delta: StepDelta,
    },
    /// Resolves contacts between voids, nodes and the core.
    ResolveCollisions,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TickStarted {
        /// Index of the tick that just began, starting at one.
        tick: u64,
    },
    /// Confirms that a connection was inserted into the network.
    ConnectionEstablished {
        /// Edge that was created.
        connection: Connection,
        /// Energy left in the pool after paying for the edge.
        energy_remaining: u32,
    },
    /// Reports that a connection request was rejected without side effects.
    ConnectionRejected {
        /// Cell selected first by the player.
        from: CellCoord,
        /// Cell selected second by the player.
        to: CellCoord,
        /// Specific reason the request failed.
        reason: ConnectionError,
    },
    /// Announces that power was recomputed from the core.
    PowerRecomputed {
        /// Number of nodes powered after the recompute.
        powered: u32,
    },
    /// Confirms that a void entered the grid.
    VoidSpawned {
        /// Identifier assigned to the void.
        void_id: VoidId,
        /// Cell the void occupies after spawning.
        cell: CellCoord,
    },
    /// Reports that a spawn request was rejected.
    VoidSpawnRejected {
        /// Cell requested for the spawn.
        cell: CellCoord,
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Confirms that a void moved between two cells.
    VoidAdvanced {
        /// Identifier of the void that moved.
        void_id: VoidId,
        /// Cell occupied before the step.
        from: CellCoord,
        /// Cell occupied after the step.
        to: CellCoord,
    },
    /// Announces that a powered node was destroyed by a void.
    NodeDestroyed {
        /// Cell the node occupied.
        cell: CellCoord,
        /// Void that made contact.
        void_id: VoidId,
    },
    /// Announces that a void was consumed while destroying a node.
    VoidDestroyed {
        /// Identifier of the destroyed void.
        void_id: VoidId,
        /// Cell the void occupied when destroyed.
        cell: CellCoord,
    },
    /// Announces that a void reached the core.
    CoreBreached {
        /// Identifier of the void that reached the core.
        void_id: VoidId,
        /// Location of the core.
        cell: CellCoord,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Tag stored for every cell of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTag {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// The cell holds the core.
    Core,
    /// The cell holds an energy node.
    Node,
}

/// Undirected edge between two adjacent cells.
///
/// Endpoints are stored in ascending order, so `between(a, b)` and
/// `between(b, a)` produce the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Connection {
    low: CellCoord,
    high: CellCoord,
}

impl Connection {
    /// Creates the canonical edge joining the two cells.
    #[must_use]
    pub fn between(first: CellCoord, second: CellCoord) -> Self {
        if first <= second {
            Self {
                low: first,
                high: second,
            }
        } else {
            Self {
                low: second,
                high: first,
            }
        }
    }

    /// Both endpoints in ascending order.
    #[must_use]
    pub const fn endpoints(&self) -> (CellCoord, CellCoord) {
        (self.low, self.high)
    }

    /// Reports whether the edge has the provided cell as an endpoint.
    #[must_use]
    pub fn touches(&self, cell: CellCoord) -> bool {
        self.low == cell || self.high == cell
    }
}

/// Unique identifier assigned to a void.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoidId(u32);

impl VoidId {
    /// Creates a new void identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Movement along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axial {
    /// Move toward decreasing indices.
    Decrease,
    /// Stay on the current index.
    Hold,
    /// Move toward increasing indices.
    Increase,
}

impl Axial {
    /// Picks the axial step that brings `from` one unit closer to `to`.
    #[must_use]
    pub fn toward(from: u32, to: u32) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Less => Self::Increase,
            std::cmp::Ordering::Equal => Self::Hold,
            std::cmp::Ordering::Greater => Self::Decrease,
        }
    }

    /// Applies the step to `value`, clamping into `0..bound`.
    #[must_use]
    pub fn apply(self, value: u32, bound: u32) -> u32 {
        let stepped = match self {
            Self::Decrease => value.saturating_sub(1),
            Self::Hold => value,
            Self::Increase => value.saturating_add(1),
        };
        stepped.min(bound.saturating_sub(1))
    }
}

/// Per-axis step a void takes in a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepDelta {
    /// Step along the column axis.
    pub column: Axial,
    /// Step along the row axis.
    pub row: Axial,
}

impl StepDelta {
    /// Greedy step from `from` toward `to`, at most one cell per axis.
    #[must_use]
    pub fn toward(from: CellCoord, to: CellCoord) -> Self {
        Self {
            column: Axial::toward(from.column(), to.column()),
            row: Axial::toward(from.row(), to.row()),
        }
    }

    /// Reports whether the step leaves the void in place.
    #[must_use]
    pub fn is_hold(&self) -> bool {
        self.column == Axial::Hold && self.row == Axial::Hold
    }
}

/// Reasons a connection request may be rejected by the world.
///
/// Variants are listed in the order the checks run.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionError {
    /// Both endpoints name the same cell.
    #[error("cannot connect a cell to itself")]
    SelfLoop,
    /// The edge already exists in one orientation or the other.
    #[error("connection already exists")]
    Duplicate,
    /// At least one endpoint is neither a live node nor the core.
    #[error("both endpoints must be live nodes or the core")]
    MissingNode,
    /// The energy pool cannot cover the connection cost.
    #[error("not enough energy to build a connection")]
    InsufficientEnergy,
    /// The endpoints do not share an edge.
    #[error("endpoints are not adjacent")]
    NotAdjacent,
}

/// Reasons a void spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// The requested cell is not empty.
    #[error("spawn cell is occupied")]
    Occupied,
    /// The live void count already reached the configured cap.
    #[error("void population cap reached")]
    PopulationCap,
}

/// Result of a single simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The simulation keeps running.
    #[default]
    Continue,
    /// A void reached the core.
    CoreBreached,
    /// The energy pool is exhausted and no node is active.
    Stalemate,
}

impl TickOutcome {
    /// Reports whether the outcome ends the simulation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Immutable representation of a single node used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeSnapshot {
    /// Cell the node occupies.
    pub cell: CellCoord,
    /// Whether the node currently takes part in a powered network.
    pub active: bool,
    /// Energy level, either zero or [`POWERED_ENERGY`].
    pub energy: u32,
}

impl NodeSnapshot {
    /// Reports whether the node currently receives power from the core.
    #[must_use]
    pub const fn is_powered(&self) -> bool {
        self.energy > 0
    }
}

/// Read-only snapshot describing every live node.
#[derive(Clone, Debug, Default)]
pub struct NodeView {
    snapshots: Vec<NodeSnapshot>,
}

impl NodeView {
    /// Creates a new node view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<NodeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.cell);
        Self { snapshots }
    }

    /// Iterator over the captured node snapshots ordered by cell.
    pub fn iter(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the node located at `cell`, if any.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&NodeSnapshot> {
        self.snapshots
            .binary_search_by_key(&cell, |snapshot| snapshot.cell)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<NodeSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single void.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoidSnapshot {
    /// Unique identifier assigned to the void.
    pub id: VoidId,
    /// Grid cell currently occupied by the void.
    pub cell: CellCoord,
}

/// Read-only snapshot describing all voids on the grid.
#[derive(Clone, Debug, Default)]
pub struct VoidView {
    snapshots: Vec<VoidSnapshot>,
}

impl VoidView {
    /// Creates a new void view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<VoidSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured void snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &VoidSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live voids captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no voids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<VoidSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the dense grid of cell tags.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellTag],
    columns: u32,
    rows: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellTag], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Tag stored at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn tag(&self, cell: CellCoord) -> Option<CellTag> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellTag> + 'a {
        self.cells.iter().copied()
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
