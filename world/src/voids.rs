//! Pool of mobile void adversaries.

use starforge_nexus_core::{CellCoord, VoidId, VoidSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Void {
    pub(crate) id: VoidId,
    pub(crate) cell: CellCoord,
}

/// Live voids ordered by identifier, plus the identifier allocator.
#[derive(Debug)]
pub(crate) struct VoidPool {
    voids: Vec<Void>,
    next_void_id: VoidId,
}

impl VoidPool {
    pub(crate) fn new() -> Self {
        Self {
            voids: Vec::new(),
            next_void_id: VoidId::new(0),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.voids.len()
    }

    /// Adds a void at `cell`, returning its freshly allocated identifier.
    pub(crate) fn spawn(&mut self, cell: CellCoord) -> VoidId {
        let id = self.next_void_id;
        self.next_void_id = VoidId::new(id.get().wrapping_add(1));
        self.voids.push(Void { id, cell });
        id
    }

    pub(crate) fn get_mut(&mut self, id: VoidId) -> Option<&mut Void> {
        self.voids.iter_mut().find(|void| void.id == id)
    }

    /// Copies the live voids so callers may mutate the pool while walking them.
    pub(crate) fn roster(&self) -> Vec<Void> {
        self.voids.clone()
    }

    /// Drops every void whose identifier appears in `destroyed`.
    pub(crate) fn compact(&mut self, destroyed: &[VoidId]) {
        if destroyed.is_empty() {
            return;
        }
        self.voids.retain(|void| !destroyed.contains(&void.id));
    }

    pub(crate) fn snapshots(&self) -> Vec<VoidSnapshot> {
        self.voids
            .iter()
            .map(|void| VoidSnapshot {
                id: void.id,
                cell: void.cell,
            })
            .collect()
    }
}
