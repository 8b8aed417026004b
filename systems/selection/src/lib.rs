#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure two-click selection system that turns pointer clicks into connection requests.

use starforge_nexus_core::{CellCoord, Command};

/// Two-click gesture tracker.
///
/// The first click on a selectable cell arms the gesture; the second click on
/// a selectable cell emits `Command::RequestConnection` and disarms it,
/// whatever the world later decides about the request.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pending: Option<CellCoord>,
}

impl Selection {
    /// Creates a new selection system with no pending cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Cell chosen by the first click of an unfinished gesture.
    #[must_use]
    pub const fn pending(&self) -> Option<CellCoord> {
        self.pending
    }

    /// Abandons the current gesture.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consumes a click and emits a connection request once the gesture completes.
    ///
    /// The `is_selectable` closure should mirror the world's
    /// `query::is_selectable` helper. Clicks on other cells are ignored.
    pub fn handle<F>(
        &mut self,
        click: Option<CellCoord>,
        mut is_selectable: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> bool,
    {
        let Some(cell) = click else {
            return;
        };

        if !is_selectable(cell) {
            return;
        }

        match self.pending.take() {
            Some(from) => out.push(Command::RequestConnection { from, to: cell }),
            None => self.pending = Some(cell),
        }
    }
}

/// Maps a pointer position in pixels to the grid cell beneath it.
///
/// Returns `None` for negative or non-finite coordinates, a non-positive cell
/// size, or positions beyond the grid.
#[must_use]
pub fn cell_from_pointer(
    x: f32,
    y: f32,
    cell_size: f32,
    dimensions: (u32, u32),
) -> Option<CellCoord> {
    if !(x.is_finite() && y.is_finite()) || cell_size <= 0.0 || x < 0.0 || y < 0.0 {
        return None;
    }

    let column = (x / cell_size).floor();
    let row = (y / cell_size).floor();
    let (columns, rows) = dimensions;
    if column >= columns as f32 || row >= rows as f32 {
        return None;
    }

    Some(CellCoord::new(column as u32, row as u32))
}
