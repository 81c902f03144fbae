#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Rockfall adapters.
//!
//! The world paints into a [`Scene`] through the core `Surface` contract; the
//! scene is a plain display list of filled rectangles in world units that any
//! backend can replay onto a window.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use rockfall_core::{Input, Surface, SurfaceRect, TileColor, TileGrid};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<TileColor> for Color {
    fn from(color: TileColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directional presses observed this frame, in the order they were read.
    pub inputs: Vec<Input>,
}

/// Timing details reported by the simulation for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Time spent applying commands to the world.
    pub simulation: Duration,
    /// Time spent repainting the scene from the world.
    pub scene_population: Duration,
}

/// Filled rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRect {
    /// Top-left corner of the rectangle.
    pub origin: Vec2,
    /// Width and height of the rectangle.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

/// Display list describing a single frame of the level.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile layout the rectangles are positioned against.
    pub tile_grid: TileGrid,
    /// Rectangles in paint order.
    pub rects: Vec<SceneRect>,
}

impl Scene {
    /// Creates an empty scene for the provided grid.
    pub fn new(tile_grid: TileGrid) -> Result<Self, RenderingError> {
        if tile_grid.columns() == 0 || tile_grid.rows() == 0 {
            return Err(RenderingError::EmptyGrid {
                columns: tile_grid.columns(),
                rows: tile_grid.rows(),
            });
        }
        let tile_length = tile_grid.tile_length();
        if tile_length.is_nan() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            tile_grid,
            rects: Vec::new(),
        })
    }

    /// Size of the whole grid in world units.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.tile_grid.width(), self.tile_grid.height())
    }

    /// Fits the scene inside a screen of the given size, preserving its aspect ratio.
    #[must_use]
    pub fn letterbox(&self, screen: Vec2) -> Letterbox {
        let size = self.size();
        let scale = (screen.x / size.x).min(screen.y / size.y).max(0.0);
        let offset = ((screen - size * scale) * 0.5).max(Vec2::ZERO);
        Letterbox { scale, offset }
    }
}

impl Surface for Scene {
    fn clear(&mut self) {
        self.rects.clear();
    }

    fn fill_rect(&mut self, rect: SurfaceRect, color: TileColor) {
        self.rects.push(SceneRect {
            origin: Vec2::new(rect.x, rect.y),
            size: Vec2::new(rect.width, rect.height),
            color: color.into(),
        });
    }
}

/// Uniform scale and centering offset mapping world units onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    /// Screen pixels per world unit.
    pub scale: f32,
    /// Screen position of the scene's top-left corner.
    pub offset: Vec2,
}

impl Letterbox {
    /// Screen-space origin and size of a scene rectangle.
    #[must_use]
    pub fn project(&self, rect: &SceneRect) -> (Vec2, Vec2) {
        (self.offset + rect.origin * self.scale, rect.size * self.scale)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Rockfall scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and repaints the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// A scene needs at least one row and one column.
    #[error("scene grid must not be empty (received {columns}x{rows})")]
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Tiles must have a positive side length.
    #[error("tile length must be positive (received {tile_length})")]
    InvalidTileLength {
        /// Provided tile side length.
        tile_length: f32,
    },
}
