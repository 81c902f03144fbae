#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Rockfall experience.

mod game;
mod level_file;
mod replay;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rockfall_core::TARGET_FPS;
use rockfall_rendering::{Color, FrameSimulationBreakdown, Presentation, RenderingBackend, Scene};
use rockfall_rendering_macroquad::MacroquadBackend;
use rockfall_system_bootstrap::Bootstrap;
use rockfall_system_input::{DrainOrder, InputQueue};
use rockfall_system_pacing::{Config, Pacer};
use rockfall_world::{query, Level, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{
    game::Game,
    replay::{parse_moves, render_text, ReplayStep},
};

const CLEAR_COLOR: Color = Color::from_rgb_u8(0, 0, 0);

/// Push stones, collect keys and mind the gravity.
#[derive(Debug, Parser)]
#[command(name = "rockfall", version)]
struct Args {
    /// TOML level file to play instead of the built-in sample level.
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Simulation ticks per second.
    #[arg(
        long,
        value_name = "N",
        default_value_t = TARGET_FPS,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    fps: u32,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_enum, default_value_t = VsyncMode::On)]
    vsync: VsyncMode,

    /// Log frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Order in which inputs pressed during one tick are applied.
    #[arg(long, value_enum, default_value_t = InputOrder::Fifo)]
    input_order: InputOrder,

    /// Run headless: apply one tick per move (U, D, L, R, or `.` to idle),
    /// print the final grid and exit.
    #[arg(long, value_name = "MOVES")]
    replay: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VsyncMode {
    On,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputOrder {
    Fifo,
    Lifo,
}

impl From<InputOrder> for DrainOrder {
    fn from(order: InputOrder) -> Self {
        match order {
            InputOrder::Fifo => Self::Fifo,
            InputOrder::Lifo => Self::Lifo,
        }
    }
}

/// Entry point for the Rockfall command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let level = match &args.level {
        Some(path) => level_file::load_level(path)?,
        None => Level::sample(),
    };
    info!(
        name = level.name().unwrap_or("unnamed"),
        columns = level.columns(),
        rows = level.rows(),
        "level loaded"
    );

    let world = World::from_level(&level);
    let bootstrap = Bootstrap;
    info!("{}", bootstrap.welcome_banner(&world));

    let queue = InputQueue::new(args.input_order.into());
    let pacer = Pacer::new(Config::from_fps(args.fps));
    let game = Game::new(world, queue, pacer);

    match &args.replay {
        Some(script) => run_replay(game, script),
        None => run_windowed(game, &bootstrap, &args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run_replay(mut game: Game, script: &str) -> Result<()> {
    let steps = parse_moves(script).context("failed to parse --replay moves")?;
    for step in &steps {
        if let ReplayStep::Move(input) = step {
            game.enqueue([*input]);
        }
        game.tick();
    }

    let world = game.world();
    let player = query::player_cell(world);
    println!("{}", render_text(world));
    println!(
        "player at ({}, {}) after {} ticks",
        player.column(),
        player.row(),
        query::tick_index(world)
    );
    Ok(())
}

fn run_windowed(mut game: Game, bootstrap: &Bootstrap, args: &Args) -> Result<()> {
    let vsync = args.vsync == VsyncMode::On;
    info!(
        fps = args.fps,
        vsync,
        input_order = ?args.input_order,
        "starting game loop"
    );

    let scene = Scene::new(bootstrap.tile_grid(game.world()))?;
    let presentation = Presentation::new(bootstrap.window_title(game.world()), CLEAR_COLOR, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, frame_input, scene| {
        let simulation_start = Instant::now();
        game.enqueue(frame_input.inputs);
        game.advance(dt);
        let simulation = simulation_start.elapsed();

        let scene_start = Instant::now();
        game.world().draw(scene);
        let scene_population = scene_start.elapsed();

        if !vsync {
            let idle = game.idle_time(simulation + scene_population);
            if idle > Duration::ZERO {
                std::thread::sleep(idle);
            }
        }

        FrameSimulationBreakdown {
            simulation,
            scene_population,
        }
    })
}
