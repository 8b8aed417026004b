use starforge_nexus_core::{CellCoord, Connection, Event, SimulationConfig, TickOutcome};
use starforge_nexus_simulation::Simulation;

fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        void_spawn_probability: 0.0,
        ..SimulationConfig::default()
    }
}

#[test]
fn connecting_the_core_powers_an_adjacent_node() {
    let core = CellCoord::new(10, 7);
    let node = CellCoord::new(10, 6);
    let mut simulation = Simulation::from_layout(&quiet_config(), &[node]).expect("layout");

    let connection = simulation
        .request_connection(core, node)
        .expect("connection accepted");

    let snapshot = simulation.snapshot();
    assert_eq!(connection, Connection::between(node, core));
    assert_eq!(snapshot.core, core);
    assert_eq!(snapshot.energy, 40);
    assert_eq!(snapshot.connections, vec![connection]);
    let node = snapshot.nodes.at(node).expect("node survives");
    assert!(node.active);
    assert!(node.is_powered());
}

#[test]
fn isolated_pair_pays_but_stays_unpowered() {
    let b = CellCoord::new(5, 5);
    let c = CellCoord::new(5, 6);
    let mut simulation = Simulation::from_layout(&quiet_config(), &[b, c]).expect("layout");

    let _ = simulation.request_connection(b, c).expect("connection accepted");

    let snapshot = simulation.snapshot();
    assert_eq!(snapshot.energy, 40);
    assert!(snapshot.nodes.iter().all(|node| !node.is_powered()));
    assert_eq!(simulation.tick(), TickOutcome::Continue);
}

#[test]
fn void_walking_from_the_edge_breaches_the_core_after_ten_ticks() {
    let mut simulation = Simulation::from_layout(&quiet_config(), &[]).expect("layout");
    let _ = simulation
        .spawn_void(CellCoord::new(0, 7))
        .expect("edge cell is free");

    for tick in 1..10 {
        assert_eq!(simulation.tick(), TickOutcome::Continue, "tick {tick}");
    }
    assert_eq!(simulation.tick(), TickOutcome::CoreBreached);

    let snapshot = simulation.snapshot();
    assert_eq!(snapshot.tick, 10);
    assert_eq!(snapshot.outcome, TickOutcome::CoreBreached);
    let void = snapshot.voids.iter().next().expect("void remains");
    assert_eq!(void.cell, CellCoord::new(10, 7));
    assert!(simulation
        .last_events()
        .iter()
        .any(|event| matches!(event, Event::CoreBreached { .. })));
}

#[test]
fn empty_pool_without_active_nodes_is_a_stalemate() {
    let config = SimulationConfig {
        initial_energy: 0,
        ..quiet_config()
    };
    let mut simulation = Simulation::new(&config).expect("valid config");

    assert_eq!(simulation.tick(), TickOutcome::Stalemate);
}

#[test]
fn spent_pool_with_a_powered_node_keeps_running() {
    let config = SimulationConfig {
        initial_energy: 10,
        ..quiet_config()
    };
    let node = CellCoord::new(9, 7);
    let mut simulation = Simulation::from_layout(&config, &[node]).expect("layout");
    let _ = simulation
        .request_connection(node, CellCoord::new(10, 7))
        .expect("connection accepted");

    assert_eq!(simulation.snapshot().energy, 0);
    assert_eq!(simulation.tick(), TickOutcome::Continue);
}

#[test]
fn void_trades_itself_for_a_powered_node_in_its_path() {
    let guard = CellCoord::new(9, 7);
    let mut simulation = Simulation::from_layout(&quiet_config(), &[guard]).expect("layout");
    let _ = simulation
        .request_connection(CellCoord::new(10, 7), guard)
        .expect("connection accepted");
    let _ = simulation
        .spawn_void(CellCoord::new(0, 7))
        .expect("edge cell is free");

    for _ in 0..9 {
        assert_eq!(simulation.tick(), TickOutcome::Continue);
    }

    let snapshot = simulation.snapshot();
    assert!(snapshot.voids.is_empty());
    assert!(snapshot.nodes.at(guard).is_none());
    assert!(snapshot.connections.is_empty());
    assert!(simulation.last_events().contains(&Event::NodeDestroyed {
        cell: guard,
        void_id: starforge_nexus_core::VoidId::new(0),
    }));
}
