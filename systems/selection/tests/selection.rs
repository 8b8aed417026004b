use starforge_nexus_core::{CellCoord, Command, Event, SimulationConfig};
use starforge_nexus_system_selection::{cell_from_pointer, Selection};
use starforge_nexus_world::{self as world, query, World};

const CELL_SIZE: f32 = 40.0;

fn click(world: &mut World, selection: &mut Selection, x: f32, y: f32) -> Vec<Event> {
    let cell = cell_from_pointer(x, y, CELL_SIZE, query::dimensions(world));
    let mut commands = Vec::new();
    selection.handle(cell, |cell| query::is_selectable(world, cell), &mut commands);
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn center_of(cell: CellCoord) -> (f32, f32) {
    (
        cell.column() as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        cell.row() as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

#[test]
fn two_clicks_connect_core_and_node() {
    let node = CellCoord::new(10, 6);
    let mut world = World::from_layout(&SimulationConfig::default(), &[node]).expect("layout");
    let mut selection = Selection::new();

    let (x, y) = center_of(query::core(&world));
    assert!(click(&mut world, &mut selection, x, y).is_empty());
    assert_eq!(selection.pending(), Some(query::core(&world)));

    let (x, y) = center_of(node);
    let events = click(&mut world, &mut selection, x, y);

    assert!(matches!(
        events.first(),
        Some(Event::ConnectionEstablished { .. })
    ));
    assert_eq!(selection.pending(), None);
    assert_eq!(query::energy(&world), 40);
}

#[test]
fn clicks_on_empty_cells_are_ignored() {
    let node = CellCoord::new(3, 3);
    let mut world = World::from_layout(&SimulationConfig::default(), &[node]).expect("layout");
    let mut selection = Selection::new();

    let (x, y) = center_of(node);
    let _ = click(&mut world, &mut selection, x, y);
    let (x, y) = center_of(CellCoord::new(3, 4));
    let events = click(&mut world, &mut selection, x, y);

    assert!(events.is_empty());
    assert_eq!(selection.pending(), Some(node));
}

#[test]
fn failed_gesture_still_resets_selection() {
    let a = CellCoord::new(3, 3);
    let b = CellCoord::new(6, 6);
    let mut world = World::from_layout(&SimulationConfig::default(), &[a, b]).expect("layout");
    let mut selection = Selection::new();

    let (x, y) = center_of(a);
    let _ = click(&mut world, &mut selection, x, y);
    let (x, y) = center_of(b);
    let events = click(&mut world, &mut selection, x, y);

    assert!(matches!(
        events.as_slice(),
        [Event::ConnectionRejected { .. }]
    ));
    assert_eq!(selection.pending(), None);
    assert_eq!(query::energy(&world), 50);
}

#[test]
fn clicking_the_same_node_twice_requests_a_self_loop() {
    let mut selection = Selection::new();
    let cell = CellCoord::new(2, 2);
    let mut out = Vec::new();

    selection.handle(Some(cell), |_| true, &mut out);
    selection.handle(Some(cell), |_| true, &mut out);

    assert_eq!(
        out,
        vec![Command::RequestConnection {
            from: cell,
            to: cell
        }]
    );
}
