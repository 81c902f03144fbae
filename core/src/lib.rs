#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rockfall game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate key presses into
//! [`Input`] values, systems turn queued inputs into [`Command`] batches, the
//! world executes those commands via its `apply` entry point and broadcasts
//! [`Event`] values describing what actually happened. Rendering goes through
//! the [`Surface`] contract so the world never depends on a graphics backend.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Rockfall.";

/// Side length of a single square tile expressed in logical surface units.
pub const TILE_SIZE: f32 = 30.0;

/// Number of simulation ticks the game loop aims to run per second.
pub const TARGET_FPS: u32 = 30;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the player attempt a single step in the given direction.
    Move {
        /// Directional input being handled.
        input: Input,
    },
    /// Advances the simulation by one tick, running the gravity pass.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the world finished a gravity pass.
    TimeAdvanced {
        /// Index of the tick that just completed, starting at one.
        tick: u64,
    },
    /// Confirms that the player entered a new cell.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that the player's destination refused entry.
    MoveBlocked {
        /// Input that was being handled.
        input: Input,
        /// Cell the player stayed in.
        at: CellCoord,
    },
    /// Confirms that a resting block was pushed sideways.
    BlockPushed {
        /// Cell the block occupied before the push.
        from: CellCoord,
        /// Cell the block occupies after the push.
        to: CellCoord,
    },
    /// Reports that a push attempt was refused by the landing rules.
    PushRejected {
        /// Cell holding the block that could not be pushed.
        at: CellCoord,
    },
    /// Confirms that a falling block dropped one row.
    BlockFell {
        /// Cell the block occupied before the drop.
        from: CellCoord,
        /// Cell the block occupies after the drop.
        to: CellCoord,
    },
    /// Confirms that collecting a key cleared its matching locks.
    LocksRemoved {
        /// Identity of the collected key.
        key: KeyIdentity,
        /// Number of lock tiles replaced with air.
        count: u32,
    },
}

/// Discrete directional input delivered by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Input {
    /// Column and row delta applied by the input, each in `-1..=1`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Reports whether the input moves along the row axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Gravity sub-state carried by stones and boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FallingState {
    /// The block has air beneath it and drops one row per tick.
    Falling,
    /// The block is supported and may be pushed sideways.
    Resting,
}

/// Distinguishes the two key/lock families present in a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyIdentity {
    /// First key family (`key1`), yellow in the default palette.
    One,
    /// Second key family (`key2`), blue in the default palette.
    Two,
}

/// Opaque fill color used when painting tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a new tile color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a tile color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(packed: u32) -> Self {
        Self {
            red: ((packed >> 16) & 0xff) as u8,
            green: ((packed >> 8) & 0xff) as u8,
            blue: (packed & 0xff) as u8,
        }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row zero is the topmost row of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell displaced by the provided deltas.
    ///
    /// `None` is returned when either axis would underflow or overflow; upper
    /// grid bounds are the caller's concern.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(CellCoord::new(column, row))
    }

    /// Cell directly beneath this one.
    #[must_use]
    pub fn below(self) -> Option<CellCoord> {
        self.offset(0, 1)
    }
}

/// Describes the discrete tile layout of a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl TileGrid {
    /// Creates a new tile grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in surface units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the grid measured in surface units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in surface units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Axis-aligned rectangle expressed in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub width: f32,
    /// Vertical extent of the rectangle.
    pub height: f32,
}

impl SurfaceRect {
    /// Rectangle covering a single grid cell at [`TILE_SIZE`] resolution.
    #[must_use]
    pub fn for_cell(cell: CellCoord) -> Self {
        Self {
            x: cell.column() as f32 * TILE_SIZE,
            y: cell.row() as f32 * TILE_SIZE,
            width: TILE_SIZE,
            height: TILE_SIZE,
        }
    }
}

/// Two-dimensional drawing surface the world paints into.
pub trait Surface {
    /// Erases everything previously drawn on the surface.
    fn clear(&mut self);

    /// Fills the rectangle with a solid color.
    fn fill_rect(&mut self, rect: SurfaceRect, color: TileColor);
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Command, Input, SurfaceRect, TileColor, TILE_SIZE};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn move_command_round_trips_through_bincode() {
        assert_round_trip(&Command::Move { input: Input::Left });
    }

    #[test]
    fn input_deltas_are_unit_steps() {
        assert_eq!(Input::Up.delta(), (0, -1));
        assert_eq!(Input::Down.delta(), (0, 1));
        assert_eq!(Input::Left.delta(), (-1, 0));
        assert_eq!(Input::Right.delta(), (1, 0));
        assert!(Input::Left.is_horizontal());
        assert!(!Input::Down.is_horizontal());
    }

    #[test]
    fn offset_refuses_to_underflow() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(CellCoord::new(1, 1)));
        assert_eq!(CellCoord::new(3, 4).below(), Some(CellCoord::new(3, 5)));
    }

    #[test]
    fn hex_colors_unpack_channels() {
        let color = TileColor::from_hex(0x8b4513);
        assert_eq!(color, TileColor::from_rgb(0x8b, 0x45, 0x13));
    }

    #[test]
    fn cell_rect_scales_by_tile_size() {
        let rect = SurfaceRect::for_cell(CellCoord::new(2, 3));
        assert_eq!(rect.x, 2.0 * TILE_SIZE);
        assert_eq!(rect.y, 3.0 * TILE_SIZE);
        assert_eq!(rect.width, TILE_SIZE);
        assert_eq!(rect.height, TILE_SIZE);
    }
}
