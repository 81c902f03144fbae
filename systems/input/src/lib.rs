#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that buffers directional presses between ticks.
//!
//! Adapters push [`Input`] values as the platform delivers them; at the start
//! of every tick the loop drains the queue into [`Command::Move`] values that
//! the world applies before its gravity pass.

use std::collections::VecDeque;

use rockfall_core::{Command, Input};

/// Order in which buffered inputs are handed to the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrainOrder {
    /// Oldest press first.
    #[default]
    Fifo,
    /// Most recent press first.
    Lifo,
}

/// Buffer of inputs received since the last tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    order: DrainOrder,
    pending: VecDeque<Input>,
}

impl InputQueue {
    /// Creates an empty queue draining in the provided order.
    #[must_use]
    pub fn new(order: DrainOrder) -> Self {
        Self {
            order,
            pending: VecDeque::new(),
        }
    }

    /// Order the queue drains in.
    #[must_use]
    pub const fn order(&self) -> DrainOrder {
        self.order
    }

    /// Records a single input for the next drain.
    pub fn push(&mut self, input: Input) {
        self.pending.push_back(input);
    }

    /// Records every input from the iterator in arrival order.
    pub fn extend<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Input>,
    {
        self.pending.extend(inputs);
    }

    /// Number of inputs waiting for the next drain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether no inputs are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Empties the queue, emitting one move command per buffered input.
    pub fn drain(&mut self, out: &mut Vec<Command>) {
        out.reserve(self.pending.len());
        match self.order {
            DrainOrder::Fifo => {
                while let Some(input) = self.pending.pop_front() {
                    out.push(Command::Move { input });
                }
            }
            DrainOrder::Lifo => {
                while let Some(input) = self.pending.pop_back() {
                    out.push(Command::Move { input });
                }
            }
        }
    }
}
