//! Dense occupancy map tagging each cell as empty, core, or node.

use starforge_nexus_core::{CellCoord, CellTag};

/// Fixed-size grid of cell tags stored in row-major order.
///
/// Bounds never change after construction. Addressing a cell outside the grid
/// is a programming error and panics.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    core: CellCoord,
    cells: Vec<CellTag>,
}

impl Grid {
    /// Creates an empty grid and places the core.
    pub(crate) fn new(columns: u32, rows: u32, core: CellCoord) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut grid = Self {
            columns,
            rows,
            core,
            cells: vec![CellTag::Empty; capacity],
        };
        let index = grid.index(core);
        grid.cells[index] = CellTag::Core;
        grid
    }

    /// Stores `tag` in an empty cell.
    pub(crate) fn place(&mut self, cell: CellCoord, tag: CellTag) {
        let index = self.index(cell);
        assert_eq!(
            self.cells[index],
            CellTag::Empty,
            "cell {cell:?} is already occupied"
        );
        assert_ne!(tag, CellTag::Core, "the core is placed once at construction");
        self.cells[index] = tag;
    }

    /// Reverts a node cell to empty after its node was destroyed.
    pub(crate) fn clear(&mut self, cell: CellCoord) {
        let index = self.index(cell);
        assert_eq!(
            self.cells[index],
            CellTag::Node,
            "only node cells can be cleared"
        );
        self.cells[index] = CellTag::Empty;
    }

    /// Tag currently stored at `cell`.
    pub(crate) fn tag(&self, cell: CellCoord) -> CellTag {
        self.cells[self.index(cell)]
    }

    /// Reports whether anything occupies `cell`.
    pub(crate) fn occupied(&self, cell: CellCoord) -> bool {
        self.tag(cell) != CellTag::Empty
    }

    /// Reports whether `cell` lies within the grid bounds.
    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    pub(crate) fn core(&self) -> CellCoord {
        self.core
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub(crate) fn cells(&self) -> &[CellTag] {
        &self.cells
    }

    fn index(&self, cell: CellCoord) -> usize {
        assert!(
            self.contains(cell),
            "cell {cell:?} lies outside the {}x{} grid",
            self.columns,
            self.rows
        );
        cell.row() as usize * self.columns as usize + cell.column() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_holds_exactly_one_core() {
        let grid = Grid::new(20, 15, CellCoord::new(10, 7));
        let cores = grid
            .cells()
            .iter()
            .filter(|tag| **tag == CellTag::Core)
            .count();
        assert_eq!(cores, 1);
        assert_eq!(grid.tag(CellCoord::new(10, 7)), CellTag::Core);
        assert!(!grid.occupied(CellCoord::new(0, 0)));
    }

    #[test]
    fn place_and_clear_round_trip_a_node() {
        let mut grid = Grid::new(5, 5, CellCoord::new(2, 2));
        let cell = CellCoord::new(1, 1);
        grid.place(cell, CellTag::Node);
        assert!(grid.occupied(cell));
        grid.clear(cell);
        assert_eq!(grid.tag(cell), CellTag::Empty);
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn placing_onto_the_core_panics() {
        let mut grid = Grid::new(5, 5, CellCoord::new(2, 2));
        grid.place(CellCoord::new(2, 2), CellTag::Node);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_queries_fail_fast() {
        let grid = Grid::new(5, 5, CellCoord::new(2, 2));
        let _ = grid.tag(CellCoord::new(5, 0));
    }
}
