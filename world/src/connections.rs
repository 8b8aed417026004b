//! Undirected adjacency edges between node positions.

use std::collections::BTreeSet;

use starforge_nexus_core::{CellCoord, Connection, ConnectionError};

/// Set of live edges stored in canonical orientation.
#[derive(Debug, Default)]
pub(crate) struct ConnectionSet {
    edges: BTreeSet<Connection>,
}

impl ConnectionSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Checks whether a connection between `from` and `to` may be built.
    ///
    /// Checks run in a fixed order and stop at the first failure: self-loop,
    /// duplicate edge, missing endpoint, insufficient energy, adjacency.
    pub(crate) fn validate_request<F>(
        &self,
        from: CellCoord,
        to: CellCoord,
        is_endpoint: F,
        energy: u32,
        cost: u32,
    ) -> Result<Connection, ConnectionError>
    where
        F: Fn(CellCoord) -> bool,
    {
        if from == to {
            return Err(ConnectionError::SelfLoop);
        }

        let connection = Connection::between(from, to);
        if self.edges.contains(&connection) {
            return Err(ConnectionError::Duplicate);
        }

        if !is_endpoint(from) || !is_endpoint(to) {
            return Err(ConnectionError::MissingNode);
        }

        if energy < cost {
            return Err(ConnectionError::InsufficientEnergy);
        }

        if !from.is_adjacent(to) {
            return Err(ConnectionError::NotAdjacent);
        }

        Ok(connection)
    }

    pub(crate) fn insert(&mut self, connection: Connection) {
        let _ = self.edges.insert(connection);
    }

    /// Reports whether an edge joins the two cells in either orientation.
    pub(crate) fn links(&self, first: CellCoord, second: CellCoord) -> bool {
        self.edges.contains(&Connection::between(first, second))
    }

    /// Removes every edge touching `cell`, returning how many were dropped.
    pub(crate) fn prune(&mut self, cell: CellCoord) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(cell));
        before - self.edges.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.edges.iter()
    }
}
