use rockfall_core::{CellCoord, Command, Event, Input};
use rockfall_system_input::{DrainOrder, InputQueue};
use rockfall_world::{self as world, query, Level, World};

fn run_tick(order: DrainOrder, inputs: &[Input]) -> (World, Vec<Event>) {
    let level = Level::from_codes(&[[3_u8, 0, 0]]).expect("corridor level is valid");
    let mut world = World::from_level(&level);
    let mut queue = InputQueue::new(order);
    queue.extend(inputs.iter().copied());

    let mut commands = Vec::new();
    queue.drain(&mut commands);
    commands.push(Command::Tick);

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    (world, events)
}

#[test]
fn fifo_applies_presses_in_arrival_order() {
    let (world, events) = run_tick(DrainOrder::Fifo, &[Input::Right, Input::Left]);

    assert_eq!(query::player_cell(&world), CellCoord::new(0, 0));
    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
            },
            Event::PlayerMoved {
                from: CellCoord::new(1, 0),
                to: CellCoord::new(0, 0),
            },
            Event::TimeAdvanced { tick: 1 },
        ]
    );
}

#[test]
fn lifo_applies_latest_press_first() {
    let (world, events) = run_tick(DrainOrder::Lifo, &[Input::Right, Input::Left]);

    assert_eq!(query::player_cell(&world), CellCoord::new(1, 0));
    assert_eq!(
        events.first(),
        Some(&Event::MoveBlocked {
            input: Input::Left,
            at: CellCoord::new(0, 0),
        })
    );
}
