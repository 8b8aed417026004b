//! Registry of energy nodes keyed by grid position.

use std::collections::BTreeMap;

use rand::Rng;
use starforge_nexus_core::{CellCoord, CellTag, NodeSnapshot};

use crate::grid::Grid;

/// Mutable state carried by a live node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Node {
    /// Whether the node takes part in a powered network.
    pub(crate) active: bool,
    /// Energy level, zero or `POWERED_ENERGY`.
    pub(crate) energy: u32,
}

/// Position-keyed set of live nodes.
#[derive(Debug, Default)]
pub(crate) struct NodeRegistry {
    entries: BTreeMap<CellCoord, Node>,
}

impl NodeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Places `count` unpowered nodes on random empty interior cells.
    ///
    /// Each placement retries until it lands on an empty cell, so the caller
    /// must guarantee that enough interior cells are free.
    pub(crate) fn spawn_initial<R: Rng>(&mut self, grid: &mut Grid, count: u32, rng: &mut R) {
        let (columns, rows) = grid.dimensions();
        for _ in 0..count {
            loop {
                let cell = CellCoord::new(
                    rng.gen_range(1..=columns - 2),
                    rng.gen_range(1..=rows - 2),
                );
                if grid.tag(cell) == CellTag::Empty {
                    self.insert(grid, cell);
                    break;
                }
            }
        }
    }

    /// Registers a node at `cell` and tags the grid accordingly.
    pub(crate) fn insert(&mut self, grid: &mut Grid, cell: CellCoord) {
        grid.place(cell, CellTag::Node);
        let _ = self.entries.insert(cell, Node::default());
    }

    pub(crate) fn find(&self, cell: CellCoord) -> Option<&Node> {
        self.entries.get(&cell)
    }

    pub(crate) fn find_mut(&mut self, cell: CellCoord) -> Option<&mut Node> {
        self.entries.get_mut(&cell)
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.entries.contains_key(&cell)
    }

    /// Deletes the node at `cell` and frees its grid cell.
    pub(crate) fn remove(&mut self, grid: &mut Grid, cell: CellCoord) -> Option<Node> {
        let removed = self.entries.remove(&cell)?;
        grid.clear(cell);
        Some(removed)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&CellCoord, &mut Node)> {
        self.entries.iter_mut()
    }

    pub(crate) fn any_active(&self) -> bool {
        self.entries.values().any(|node| node.active)
    }

    pub(crate) fn snapshots(&self) -> Vec<NodeSnapshot> {
        self.entries
            .iter()
            .map(|(cell, node)| NodeSnapshot {
                cell: *cell,
                active: node.active,
                energy: node.energy,
            })
            .collect()
    }
}
