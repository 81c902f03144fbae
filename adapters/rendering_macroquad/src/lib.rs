#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Rockfall.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use std::time::{Duration, Instant};

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use rockfall_core::Input;
use rockfall_rendering::{
    Color, FrameInput, FrameSimulationBreakdown, Presentation, RenderingBackend, Scene,
};
use tracing::{debug, info};

/// Keys that translate into a directional input, in polling order.
const MOVEMENT_KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::W,
    KeyCode::Down,
    KeyCode::S,
    KeyCode::Left,
    KeyCode::A,
    KeyCode::Right,
    KeyCode::D,
];

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow keys and WASD, one entry per key pressed this frame.
    inputs: Vec<Input>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let inputs = MOVEMENT_KEYS
            .iter()
            .filter(|key| is_key_pressed(**key))
            .filter_map(|key| input_for_key(*key))
            .collect();

        Self {
            quit_requested,
            inputs,
        }
    }
}

fn input_for_key(key: KeyCode) -> Option<Input> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Input::Up),
        KeyCode::Down | KeyCode::S => Some(Input::Down),
        KeyCode::Left | KeyCode::A => Some(Input::Left),
        KeyCode::Right | KeyCode::D => Some(Input::Right),
        _ => None,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    scene_population: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    scene_population_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    avg_simulation: Duration,
    avg_scene_population: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the averages once one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.scene_population_accum += breakdown.scene_population;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let metrics = FpsMetrics {
            per_second: self.frames as f32 / seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_scene_population: self.scene_population_accum / frames,
            avg_render: self.render_accum / frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 720,
            window_height: 540,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        debug!(?swap_interval, show_fps, "opening macroquad window");
        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    debug!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    inputs: keyboard.inputs,
                };
                let simulation = update_scene(frame_dt, frame_input, &mut scene);

                let render_start = Instant::now();
                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, screen);
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: simulation.simulation,
                    scene_population: simulation.scene_population,
                    render,
                });
                if show_fps {
                    if let Some(metrics) = fps_metrics {
                        info!(
                            fps = f64::from(metrics.per_second),
                            sim_ms = metrics.avg_simulation.as_secs_f64() * 1_000.0,
                            scene_ms = metrics.avg_scene_population.as_secs_f64() * 1_000.0,
                            render_ms = metrics.avg_render.as_secs_f64() * 1_000.0,
                            "frame metrics"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, screen: Vec2) {
    let letterbox = scene.letterbox(screen);
    for rect in &scene.rects {
        let (origin, size) = letterbox.project(rect);
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x,
            size.y,
            to_macroquad_color(rect.color),
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
