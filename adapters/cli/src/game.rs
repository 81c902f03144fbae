//! Tick loop wiring between the input queue, the pacer and the world.

use std::time::Duration;

use rockfall_core::{Command, Event, Input};
use rockfall_system_input::InputQueue;
use rockfall_system_pacing::Pacer;
use rockfall_world::{self as world, World};
use tracing::{debug, trace};

/// Owns the world and the pure systems that feed it.
#[derive(Debug)]
pub(crate) struct Game {
    world: World,
    queue: InputQueue,
    pacer: Pacer,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Game {
    pub(crate) fn new(world: World, queue: InputQueue, pacer: Pacer) -> Self {
        Self {
            world,
            queue,
            pacer,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn enqueue<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Input>,
    {
        self.queue.extend(inputs);
    }

    /// Runs every tick that became due during `dt`.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let mut due = Vec::new();
        self.pacer.advance(dt, &mut due);
        for _ in due {
            self.tick();
        }
    }

    /// Time left in the current tick after `elapsed` of work.
    pub(crate) fn idle_time(&self, elapsed: Duration) -> Duration {
        self.pacer.sleep_after(elapsed)
    }

    /// Drains all queued inputs, then runs one gravity pass.
    pub(crate) fn tick(&mut self) {
        self.queue.drain(&mut self.commands);
        self.commands.push(Command::Tick);

        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in self.events.drain(..) {
            log_event(&event);
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::TimeAdvanced { .. } => trace!(?event, "world event"),
        Event::LocksRemoved { key, count } => debug!(?key, count, "locks removed"),
        _ => debug!(?event, "world event"),
    }
}
