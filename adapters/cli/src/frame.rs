//! ASCII rendering of simulation snapshots.

use std::fmt::Write as _;

use starforge_nexus_core::{CellCoord, CellTag};
use starforge_nexus_simulation::Snapshot;

/// Draws one character per cell, one line per row.
///
/// Voids are drawn over whatever occupies their cell.
pub(crate) fn render(snapshot: &Snapshot<'_>) -> String {
    let (columns, rows) = snapshot.grid.dimensions();
    let mut frame = String::with_capacity(((columns + 1) * rows) as usize);

    for row in 0..rows {
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            frame.push(glyph(snapshot, cell));
        }
        frame.push('\n');
    }

    frame
}

fn glyph(snapshot: &Snapshot<'_>, cell: CellCoord) -> char {
    if snapshot.voids.iter().any(|void| void.cell == cell) {
        return 'V';
    }

    match snapshot.grid.tag(cell) {
        Some(CellTag::Core) => 'C',
        Some(CellTag::Node) => match snapshot.nodes.at(cell) {
            Some(node) if node.is_powered() => 'O',
            _ => 'o',
        },
        Some(CellTag::Empty) | None => '.',
    }
}

/// One-line summary printed under each frame.
pub(crate) fn status_line(snapshot: &Snapshot<'_>) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "tick {} | energy {} | links {} | voids {} | {:?}",
        snapshot.tick,
        snapshot.energy,
        snapshot.connections.len(),
        snapshot.voids.len(),
        snapshot.outcome
    );
    line
}
