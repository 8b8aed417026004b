#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Discrete simulation clock for Starforge Nexus.
//!
//! [`Simulation`] owns the authoritative world together with the spawning and
//! movement systems and drives them through one tick at a time. Adapters feed
//! connection gestures through [`Simulation::request_connection`] and render
//! from the borrowed [`Snapshot`].

pub mod config;

use starforge_nexus_core::{
    CellCoord, Command, ConfigError, Connection, ConnectionError, Event, GridView, NodeView,
    SimulationConfig, SpawnError, TickOutcome, VoidId, VoidView,
};
use starforge_nexus_system_movement::Movement;
use starforge_nexus_system_spawning::{Config as SpawningConfig, Spawning};
use starforge_nexus_world::{self as world, query, World};
use tracing::{debug, info};

const LOG_TARGET: &str = "starforge_nexus::simulation";

/// Immutable view of everything a renderer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    /// Cell tags in row-major order.
    pub grid: GridView<'a>,
    /// Every live node with its power state.
    pub nodes: NodeView,
    /// Live connections in canonical order.
    pub connections: Vec<Connection>,
    /// Voids currently on the grid.
    pub voids: VoidView,
    /// Location of the core.
    pub core: CellCoord,
    /// Energy left in the pool.
    pub energy: u32,
    /// Number of ticks run so far.
    pub tick: u64,
    /// Outcome of the most recent tick.
    pub outcome: TickOutcome,
}

/// Owns the world and its systems and advances them in lockstep.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    movement: Movement,
    outcome: TickOutcome,
    last_events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Builds a simulation whose starting nodes are scattered by the seeded generator.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        Ok(Self::with_world(world, config))
    }

    /// Builds a simulation whose starting nodes sit on the provided cells.
    pub fn from_layout(
        config: &SimulationConfig,
        layout: &[CellCoord],
    ) -> Result<Self, ConfigError> {
        let world = World::from_layout(config, layout)?;
        Ok(Self::with_world(world, config))
    }

    fn with_world(world: World, config: &SimulationConfig) -> Self {
        Self {
            world,
            spawning: Spawning::new(SpawningConfig::from(config)),
            movement: Movement::new(),
            outcome: TickOutcome::Continue,
            last_events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Runs a single tick and reports whether the simulation should continue.
    ///
    /// A tick starts the clock, lets the spawning system roll, steps every
    /// void toward the core and then settles collisions. Once a terminal
    /// outcome has been reported, further calls return it without touching
    /// the world.
    pub fn tick(&mut self) -> TickOutcome {
        if self.outcome.is_terminal() {
            return self.outcome;
        }

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick, &mut events);

        self.spawning.handle(
            &events,
            query::void_view(&self.world).len(),
            query::dimensions(&self.world),
            &mut self.commands,
        );
        self.flush_commands(&mut events);

        self.movement.handle(
            &events,
            &query::void_view(&self.world),
            query::core(&self.world),
            &mut self.commands,
        );
        self.flush_commands(&mut events);

        let collisions_start = events.len();
        world::apply(&mut self.world, Command::ResolveCollisions, &mut events);
        let breached = events[collisions_start..]
            .iter()
            .any(|event| matches!(event, Event::CoreBreached { .. }));

        self.outcome = if breached {
            TickOutcome::CoreBreached
        } else if query::energy(&self.world) == 0 && !query::any_active_node(&self.world) {
            TickOutcome::Stalemate
        } else {
            TickOutcome::Continue
        };

        let tick = query::tick(&self.world);
        if self.outcome.is_terminal() {
            info!(target: LOG_TARGET, tick, outcome = ?self.outcome, "simulation.ended");
        } else {
            debug!(target: LOG_TARGET, tick, events = events.len(), "simulation.ticked");
        }

        self.last_events = events;
        self.outcome
    }

    fn flush_commands(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    /// Attempts to connect two cells on behalf of the player.
    ///
    /// On success the energy pool has been charged and power recomputed
    /// before this returns. Rejections leave the world untouched.
    pub fn request_connection(
        &mut self,
        from: CellCoord,
        to: CellCoord,
    ) -> Result<Connection, ConnectionError> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::RequestConnection { from, to },
            &mut events,
        );

        events
            .into_iter()
            .find_map(|event| match event {
                Event::ConnectionEstablished { connection, .. } => Some(Ok(connection)),
                Event::ConnectionRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("world answers every connection request"))
    }

    /// Places a void on `cell` outside the regular spawning roll.
    pub fn spawn_void(&mut self, cell: CellCoord) -> Result<VoidId, SpawnError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::SpawnVoid { cell }, &mut events);

        events
            .into_iter()
            .find_map(|event| match event {
                Event::VoidSpawned { void_id, .. } => Some(Ok(void_id)),
                Event::VoidSpawnRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("world answers every spawn request"))
    }

    /// Captures a read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: query::grid_view(&self.world),
            nodes: query::node_view(&self.world),
            connections: query::connections(&self.world),
            voids: query::void_view(&self.world),
            core: query::core(&self.world),
            energy: query::energy(&self.world),
            tick: query::tick(&self.world),
            outcome: self.outcome,
        }
    }

    /// Events produced by the most recent tick.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.last_events
    }

    /// Outcome of the most recent tick.
    #[must_use]
    pub const fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    /// Reports whether a click on `cell` can start or finish a connection gesture.
    #[must_use]
    pub fn is_selectable(&self, cell: CellCoord) -> bool {
        query::is_selectable(&self.world, cell)
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        query::dimensions(&self.world)
    }

    /// Banner adapters may greet the player with.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }
}
