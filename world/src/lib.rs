#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Starforge Nexus.
//!
//! The world owns the grid, the node registry, the connection set, the power
//! field and the void pool. It mutates only through [`apply`] and exposes
//! read-only access through the [`query`] module. Every structural change to
//! the connection graph is followed by a full power recompute before the
//! command returns, so observers never see stale `active`/`energy` values.

mod connections;
mod grid;
mod nodes;
mod power;
mod voids;

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starforge_nexus_core::{
    CellCoord, Command, ConfigError, Event, SimulationConfig, SpawnError, StepDelta, VoidId,
    POWERED_ENERGY, WELCOME_BANNER,
};
use tracing::{debug, info};

use connections::ConnectionSet;
use grid::Grid;
use nodes::NodeRegistry;
use power::PowerField;
use voids::VoidPool;

const LOG_TARGET: &str = "starforge_nexus::world";

/// Represents the authoritative Starforge Nexus world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    nodes: NodeRegistry,
    connections: ConnectionSet,
    power: PowerField,
    voids: VoidPool,
    energy: u32,
    connection_cost: u32,
    void_population_cap: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world with `initial_node_count` nodes scattered at random.
    ///
    /// Node placement draws from stream 0 of a ChaCha generator seeded with
    /// `rng_seed`, so equal configurations yield equal boards.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config);
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        world
            .nodes
            .spawn_initial(&mut world.grid, config.initial_node_count, &mut rng);
        let _ = world.recompute_power();
        Ok(world)
    }

    /// Creates a world whose nodes sit exactly on the provided cells.
    ///
    /// `initial_node_count` is ignored; the layout must stay inside the grid,
    /// avoid the core and list each cell once.
    pub fn from_layout(
        config: &SimulationConfig,
        layout: &[CellCoord],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config);
        let core = world.grid.core();
        let mut seen = BTreeSet::new();
        for &cell in layout {
            if !world.grid.contains(cell) {
                return Err(ConfigError::NodeOutOfBounds(cell));
            }
            if cell == core {
                return Err(ConfigError::NodeOnCore(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::DuplicateNode(cell));
            }
        }

        for cell in seen {
            world.nodes.insert(&mut world.grid, cell);
        }
        let _ = world.recompute_power();
        Ok(world)
    }

    fn empty(config: &SimulationConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(config.grid_columns, config.grid_rows, config.core_cell()),
            nodes: NodeRegistry::new(),
            connections: ConnectionSet::new(),
            power: PowerField::default(),
            voids: VoidPool::new(),
            energy: config.initial_energy,
            connection_cost: config.connection_cost,
            void_population_cap: config.void_population_cap,
            tick_index: 0,
        }
    }

    fn try_connect(&mut self, from: CellCoord, to: CellCoord, out_events: &mut Vec<Event>) {
        let core = self.grid.core();
        let nodes = &self.nodes;
        let verdict = self.connections.validate_request(
            from,
            to,
            |cell| cell == core || nodes.contains(cell),
            self.energy,
            self.connection_cost,
        );

        let connection = match verdict {
            Ok(connection) => connection,
            Err(reason) => {
                debug!(target: LOG_TARGET, ?from, ?to, %reason, "connection.rejected");
                out_events.push(Event::ConnectionRejected { from, to, reason });
                return;
            }
        };

        self.connections.insert(connection);
        for endpoint in [from, to] {
            if let Some(node) = self.nodes.find_mut(endpoint) {
                node.active = true;
            }
        }
        self.energy = self.energy.saturating_sub(self.connection_cost);
        info!(
            target: LOG_TARGET,
            ?from,
            ?to,
            energy_remaining = self.energy,
            "connection.established"
        );
        out_events.push(Event::ConnectionEstablished {
            connection,
            energy_remaining: self.energy,
        });
        self.publish_power(out_events);
    }

    fn spawn_void(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let reason = if self.voids.len() >= self.void_population_cap as usize {
            Some(SpawnError::PopulationCap)
        } else if self.grid.occupied(cell) {
            Some(SpawnError::Occupied)
        } else {
            None
        };

        if let Some(reason) = reason {
            debug!(target: LOG_TARGET, ?cell, %reason, "void.spawn_rejected");
            out_events.push(Event::VoidSpawnRejected { cell, reason });
            return;
        }

        let void_id = self.voids.spawn(cell);
        debug!(target: LOG_TARGET, void = void_id.get(), ?cell, "void.spawned");
        out_events.push(Event::VoidSpawned { void_id, cell });
    }

    fn step_void(&mut self, void_id: VoidId, delta: StepDelta, out_events: &mut Vec<Event>) {
        let (columns, rows) = self.grid.dimensions();
        let Some(void) = self.voids.get_mut(void_id) else {
            return;
        };

        let from = void.cell;
        let to = CellCoord::new(
            delta.column.apply(from.column(), columns),
            delta.row.apply(from.row(), rows),
        );
        if to == from {
            return;
        }

        void.cell = to;
        out_events.push(Event::VoidAdvanced { void_id, from, to });
    }

    /// Walks the voids in identifier order and settles their contacts.
    ///
    /// Voids destroyed during the pass are collected and removed afterwards so
    /// the walk never observes a shrinking pool. A void on the core ends the
    /// pass immediately.
    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let core = self.grid.core();
        let mut destroyed = Vec::new();

        for void in self.voids.roster() {
            if void.cell == core {
                info!(
                    target: LOG_TARGET,
                    void = void.id.get(),
                    tick = self.tick_index,
                    "core.breached"
                );
                out_events.push(Event::CoreBreached {
                    void_id: void.id,
                    cell: core,
                });
                break;
            }

            let powered = self
                .nodes
                .find(void.cell)
                .is_some_and(|node| node.energy > 0);
            if !powered {
                continue;
            }

            self.destroy_node(void.cell, void.id, out_events);
            destroyed.push(void.id);
            out_events.push(Event::VoidDestroyed {
                void_id: void.id,
                cell: void.cell,
            });
        }

        self.voids.compact(&destroyed);
    }

    fn destroy_node(&mut self, cell: CellCoord, void_id: VoidId, out_events: &mut Vec<Event>) {
        if self.nodes.remove(&mut self.grid, cell).is_none() {
            return;
        }
        let pruned = self.connections.prune(cell);
        info!(
            target: LOG_TARGET,
            ?cell,
            void = void_id.get(),
            pruned,
            "node.destroyed"
        );
        out_events.push(Event::NodeDestroyed { cell, void_id });
        self.publish_power(out_events);
    }

    fn publish_power(&mut self, out_events: &mut Vec<Event>) {
        let powered = self.recompute_power();
        out_events.push(Event::PowerRecomputed { powered });
    }

    /// Recomputes power for every node from scratch, returning the powered count.
    fn recompute_power(&mut self) -> u32 {
        let (columns, rows) = self.grid.dimensions();
        let connections = &self.connections;
        self.power
            .rebuild_with(columns, rows, self.grid.core(), |from, to| {
                connections.links(from, to)
            });

        let mut powered = 0;
        for (cell, node) in self.nodes.iter_mut() {
            if self.power.is_reached(*cell) {
                node.energy = POWERED_ENERGY;
                node.active = true;
                powered += 1;
            } else {
                node.energy = 0;
                node.active = false;
            }
        }
        powered
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TickStarted {
                tick: world.tick_index,
            });
        }
        Command::RequestConnection { from, to } => world.try_connect(from, to, out_events),
        Command::SpawnVoid { cell } => world.spawn_void(cell, out_events),
        Command::StepVoid { void_id, delta } => world.step_void(void_id, delta, out_events),
        Command::ResolveCollisions => world.resolve_collisions(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use starforge_nexus_core::{CellCoord, CellTag, Connection, GridView, NodeView, VoidView};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Location of the core.
    #[must_use]
    pub fn core(world: &World) -> CellCoord {
        world.grid.core()
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Exposes a read-only view of the cell tags.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        let (columns, rows) = world.grid.dimensions();
        GridView::new(world.grid.cells(), columns, rows)
    }

    /// Captures a read-only view of every live node.
    #[must_use]
    pub fn node_view(world: &World) -> NodeView {
        NodeView::from_snapshots(world.nodes.snapshots())
    }

    /// Lists the live connections in canonical order.
    #[must_use]
    pub fn connections(world: &World) -> Vec<Connection> {
        world.connections.iter().copied().collect()
    }

    /// Captures a read-only view of the voids on the grid.
    #[must_use]
    pub fn void_view(world: &World) -> VoidView {
        VoidView::from_snapshots(world.voids.snapshots())
    }

    /// Energy left in the pool.
    #[must_use]
    pub fn energy(world: &World) -> u32 {
        world.energy
    }

    /// Number of ticks started so far.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether any node is currently active.
    #[must_use]
    pub fn any_active_node(world: &World) -> bool {
        world.nodes.any_active()
    }

    /// Reports whether `cell` may take part in a connection gesture.
    ///
    /// Cells outside the grid are never selectable.
    #[must_use]
    pub fn is_selectable(world: &World, cell: CellCoord) -> bool {
        world.grid.contains(cell) && world.grid.tag(cell) != CellTag::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starforge_nexus_core::{CellTag, Connection, ConnectionError};

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    fn connect(world: &mut World, from: CellCoord, to: CellCoord) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::RequestConnection { from, to }, &mut events);
        events
    }

    #[test]
    fn new_world_places_configured_nodes_unpowered() {
        let world = World::new(&config()).expect("valid config");
        let nodes = query::node_view(&world).into_vec();

        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().all(|node| !node.active && node.energy == 0));
        assert_eq!(query::energy(&world), 50);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn node_placement_is_deterministic_for_same_seed() {
        let first = World::new(&config()).expect("valid config");
        let second = World::new(&config()).expect("valid config");

        assert_eq!(
            query::node_view(&first).into_vec(),
            query::node_view(&second).into_vec()
        );
    }

    #[test]
    fn layout_rejects_invalid_cells() {
        let config = config();
        assert_eq!(
            World::from_layout(&config, &[CellCoord::new(20, 0)]).err(),
            Some(ConfigError::NodeOutOfBounds(CellCoord::new(20, 0)))
        );
        assert_eq!(
            World::from_layout(&config, &[CellCoord::new(10, 7)]).err(),
            Some(ConfigError::NodeOnCore(CellCoord::new(10, 7)))
        );
        assert_eq!(
            World::from_layout(&config, &[CellCoord::new(1, 1), CellCoord::new(1, 1)]).err(),
            Some(ConfigError::DuplicateNode(CellCoord::new(1, 1)))
        );
    }

    #[test]
    fn connecting_to_the_core_powers_the_node() {
        let core = CellCoord::new(10, 7);
        let node = CellCoord::new(10, 6);
        let mut world = World::from_layout(&config(), &[node]).expect("valid layout");

        let events = connect(&mut world, core, node);

        assert_eq!(
            events,
            vec![
                Event::ConnectionEstablished {
                    connection: Connection::between(core, node),
                    energy_remaining: 40,
                },
                Event::PowerRecomputed { powered: 1 },
            ]
        );
        let snapshot = *query::node_view(&world).at(node).expect("node exists");
        assert!(snapshot.active);
        assert_eq!(snapshot.energy, POWERED_ENERGY);
    }

    #[test]
    fn recompute_is_idempotent() {
        let core = CellCoord::new(10, 7);
        let chain = [
            CellCoord::new(10, 6),
            CellCoord::new(10, 5),
            CellCoord::new(4, 4),
            CellCoord::new(4, 5),
        ];
        let mut world = World::from_layout(&config(), &chain).expect("valid layout");
        let _ = connect(&mut world, core, chain[0]);
        let _ = connect(&mut world, chain[0], chain[1]);
        let _ = connect(&mut world, chain[2], chain[3]);

        let before = query::node_view(&world).into_vec();
        let first = world.recompute_power();
        let after_first = query::node_view(&world).into_vec();
        let second = world.recompute_power();
        let after_second = query::node_view(&world).into_vec();

        assert_eq!(first, 2);
        assert_eq!(first, second);
        assert_eq!(before, after_first);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn rejected_connection_leaves_state_untouched() {
        let node = CellCoord::new(3, 3);
        let mut world = World::from_layout(&config(), &[node]).expect("valid layout");

        let events = connect(&mut world, node, CellCoord::new(3, 4));

        assert_eq!(
            events,
            vec![Event::ConnectionRejected {
                from: node,
                to: CellCoord::new(3, 4),
                reason: ConnectionError::MissingNode,
            }]
        );
        assert_eq!(query::energy(&world), 50);
        assert!(query::connections(&world).is_empty());
    }

    #[test]
    fn spawn_is_rejected_on_occupied_cells_and_at_cap() {
        let config = SimulationConfig {
            void_population_cap: 1,
            ..config()
        };
        let mut world = World::from_layout(&config, &[CellCoord::new(1, 1)]).expect("valid layout");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SpawnVoid {
                cell: CellCoord::new(1, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnVoid {
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnVoid {
                cell: CellCoord::new(0, 1),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::VoidSpawnRejected {
                    cell: CellCoord::new(1, 1),
                    reason: SpawnError::Occupied,
                },
                Event::VoidSpawned {
                    void_id: VoidId::new(0),
                    cell: CellCoord::new(0, 0),
                },
                Event::VoidSpawnRejected {
                    cell: CellCoord::new(0, 1),
                    reason: SpawnError::PopulationCap,
                },
            ]
        );
    }

    #[test]
    fn step_void_clamps_to_grid_bounds() {
        let mut world = World::from_layout(&config(), &[]).expect("valid layout");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnVoid {
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::StepVoid {
                void_id: VoidId::new(0),
                delta: StepDelta {
                    column: starforge_nexus_core::Axial::Decrease,
                    row: starforge_nexus_core::Axial::Increase,
                },
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::VoidAdvanced {
                void_id: VoidId::new(0),
                from: CellCoord::new(0, 0),
                to: CellCoord::new(0, 1),
            }]
        );
    }

    #[test]
    fn selectable_cells_are_nodes_and_core() {
        let world = World::from_layout(&config(), &[CellCoord::new(4, 4)]).expect("valid layout");

        assert!(query::is_selectable(&world, CellCoord::new(4, 4)));
        assert!(query::is_selectable(&world, CellCoord::new(10, 7)));
        assert!(!query::is_selectable(&world, CellCoord::new(4, 5)));
        assert!(!query::is_selectable(&world, CellCoord::new(40, 5)));
        assert_eq!(
            query::grid_view(&world).tag(CellCoord::new(4, 4)),
            Some(CellTag::Node)
        );
    }

    #[test]
    fn tick_advances_the_clock() {
        let mut world = World::from_layout(&config(), &[]).expect("valid layout");
        let mut events = Vec::new();

        apply(&mut world, Command::Tick, &mut events);
        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(query::tick(&world), 2);
        assert_eq!(events.last(), Some(&Event::TickStarted { tick: 2 }));
    }
}
