#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep pacing for the Rockfall game loop.
//!
//! Frame time is accumulated and converted into whole [`Command::Tick`]
//! values at the configured cadence. A slow frame delays ticks but never
//! discards them: every elapsed interval eventually yields one tick.

use std::time::Duration;

use rockfall_core::{Command, TARGET_FPS};

/// Configuration parameters required to construct the pacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a configuration ticking once per `tick_interval`.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Creates a configuration ticking `ticks_per_second` times per second.
    ///
    /// A rate of zero is treated as one tick per second.
    #[must_use]
    pub fn from_fps(ticks_per_second: u32) -> Self {
        let rate = ticks_per_second.max(1);
        Self::new(Duration::from_secs(1) / rate)
    }

    /// Interval between consecutive ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_fps(TARGET_FPS)
    }
}

/// Pure system converting elapsed frame time into tick commands.
#[derive(Debug)]
pub struct Pacer {
    tick_interval: Duration,
    accumulator: Duration,
}

impl Pacer {
    /// Creates a new pacer using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Interval between consecutive ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Adds `dt` of frame time and emits one tick command per elapsed interval.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        self.accumulator = self.accumulator.saturating_add(dt);
        for _ in 0..self.resolve_due_ticks() {
            out.push(Command::Tick);
        }
    }

    /// Time to wait before the next tick when a tick's work took `elapsed`.
    ///
    /// Returns zero when the work already overran the interval.
    #[must_use]
    pub fn sleep_after(&self, elapsed: Duration) -> Duration {
        self.tick_interval.saturating_sub(elapsed)
    }

    fn resolve_due_ticks(&mut self) -> usize {
        if self.tick_interval.is_zero() {
            self.accumulator = Duration::ZERO;
            return 1;
        }

        let mut due = 0;
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            due += 1;
        }
        due
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
