//! Breadth-first power propagation from the core.

use std::collections::VecDeque;

use starforge_nexus_core::CellCoord;

/// Dense reachability grid seeded from the core.
///
/// The field mirrors the grid dimensions and records which cells a
/// breadth-first search starting at the core reaches through live
/// connections. Every rebuild starts from scratch so the result depends only
/// on the current edge set.
#[derive(Clone, Debug, Default)]
pub(crate) struct PowerField {
    width: u32,
    height: u32,
    reached: Vec<bool>,
}

impl PowerField {
    /// Rebuilds reachability from `core`, following `linked` between neighbours.
    pub(crate) fn rebuild_with<F>(&mut self, width: u32, height: u32, core: CellCoord, linked: F)
    where
        F: Fn(CellCoord, CellCoord) -> bool,
    {
        let width_usize = usize::try_from(width).unwrap_or(0);
        let height_usize = usize::try_from(height).unwrap_or(0);
        let cell_count = width_usize.checked_mul(height_usize).unwrap_or(0);

        self.width = width;
        self.height = height;
        self.reached.clear();
        self.reached.resize(cell_count, false);

        let Some(core_index) = index(width_usize, core).filter(|index| *index < cell_count) else {
            return;
        };
        self.reached[core_index] = true;

        let mut queue = VecDeque::new();
        queue.push_back(core);

        while let Some(cell) = queue.pop_front() {
            for neighbor in neighbors(cell, width, height) {
                let Some(neighbor_index) = index(width_usize, neighbor) else {
                    continue;
                };

                if linked(cell, neighbor) && !self.reached[neighbor_index] {
                    self.reached[neighbor_index] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    /// Reports whether the last rebuild reached `cell`.
    #[must_use]
    pub(crate) fn is_reached(&self, cell: CellCoord) -> bool {
        if cell.column() >= self.width || cell.row() >= self.height {
            return false;
        }

        usize::try_from(self.width)
            .ok()
            .and_then(|width| index(width, cell))
            .and_then(|offset| self.reached.get(offset).copied())
            .unwrap_or(false)
    }
}

/// In-bounds neighbours in the fixed order down, up, right, left.
fn neighbors(cell: CellCoord, width: u32, height: u32) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_add(1) {
        if row < height {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < width {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
