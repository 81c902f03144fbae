//! Decoding of integer level tables into tile grids.

use rockfall_core::{CellCoord, FallingState};
use thiserror::Error;

use crate::tile::{Tile, BLUE_KEY, YELLOW_KEY};

/// Built-in level loaded when no level file is supplied.
pub const SAMPLE_LEVEL: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 2, 0, 2],
    [2, 4, 2, 6, 1, 2, 0, 2],
    [2, 8, 4, 1, 1, 2, 0, 2],
    [2, 4, 1, 1, 1, 9, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

/// Highest tile code understood by [`decode_tile`].
pub const MAX_TILE_CODE: u8 = 11;

/// Reasons a level table is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The table has no rows or its first row has no cells.
    #[error("invalid level: the level contains no cells")]
    Empty,
    /// A row's length differs from the first row.
    #[error("invalid level: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A cell holds a code with no tile mapping.
    #[error("invalid level: unknown tile code {code} at column {column}, row {row}")]
    UnknownTile {
        /// Code found in the table.
        code: u8,
        /// Zero-based column of the cell.
        column: usize,
        /// Zero-based row of the cell.
        row: usize,
    },
    /// No cell holds the player marker.
    #[error("invalid level: no player marker (code 3) found")]
    MissingPlayer,
    /// More than one cell holds the player marker.
    #[error("invalid level: second player marker at {second:?}, first at {first:?}")]
    DuplicatePlayer {
        /// First marker encountered in row-major order.
        first: CellCoord,
        /// Next marker encountered in row-major order.
        second: CellCoord,
    },
    /// The table is too large to address with cell coordinates.
    #[error("invalid level: {columns}x{rows} exceeds the addressable grid size")]
    TooLarge {
        /// Number of columns in the table.
        columns: usize,
        /// Number of rows in the table.
        rows: usize,
    },
}

/// Maps a level code to its tile, `None` for unknown codes.
#[must_use]
pub fn decode_tile(code: u8) -> Option<Tile> {
    let tile = match code {
        0 => Tile::Air,
        1 => Tile::Flux,
        2 => Tile::Unbreakable,
        3 => Tile::PlayerMarker,
        4 => Tile::Stone(FallingState::Resting),
        5 => Tile::Stone(FallingState::Falling),
        6 => Tile::Box(FallingState::Resting),
        7 => Tile::Box(FallingState::Falling),
        8 => Tile::Key(&YELLOW_KEY),
        9 => Tile::Lock(&YELLOW_KEY),
        10 => Tile::Key(&BLUE_KEY),
        11 => Tile::Lock(&BLUE_KEY),
        _ => return None,
    };
    Some(tile)
}

/// Validated rectangular level ready to seed a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    name: Option<String>,
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    player_start: CellCoord,
}

impl Level {
    /// Decodes a table of tile codes, row zero at the top.
    ///
    /// The player starts on the single cell holding the player marker.
    pub fn from_codes<R>(table: &[R]) -> Result<Self, LevelError>
    where
        R: AsRef<[u8]>,
    {
        let expected = table.first().map_or(0, |row| row.as_ref().len());
        if expected == 0 {
            return Err(LevelError::Empty);
        }

        let too_large = || LevelError::TooLarge {
            columns: expected,
            rows: table.len(),
        };
        let columns = u32::try_from(expected).map_err(|_| too_large())?;
        let rows = u32::try_from(table.len()).map_err(|_| too_large())?;

        let mut tiles = Vec::with_capacity(expected * table.len());
        let mut player_start: Option<CellCoord> = None;
        for (row_index, row) in table.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }

            for (column_index, &code) in row.iter().enumerate() {
                let tile = decode_tile(code).ok_or(LevelError::UnknownTile {
                    code,
                    column: column_index,
                    row: row_index,
                })?;

                if tile.is_player() {
                    let cell = CellCoord::new(column_index as u32, row_index as u32);
                    if let Some(first) = player_start {
                        return Err(LevelError::DuplicatePlayer {
                            first,
                            second: cell,
                        });
                    }
                    player_start = Some(cell);
                }
                tiles.push(tile);
            }
        }

        let player_start = player_start.ok_or(LevelError::MissingPlayer)?;
        Ok(Self {
            name: None,
            columns,
            rows,
            tiles,
            player_start,
        })
    }

    /// The built-in sample level.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_codes(&SAMPLE_LEVEL)
            .expect("built-in sample level is well formed")
            .with_name("sample")
    }

    /// Attaches a display name to the level.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name of the level, if one was provided.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of columns in the level.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the level.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell occupied by the player marker.
    #[must_use]
    pub const fn player_start(&self) -> CellCoord {
        self.player_start
    }

    /// Decoded tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_level_starts_player_at_one_one() {
        let level = Level::sample();
        assert_eq!(level.columns(), 8);
        assert_eq!(level.rows(), 6);
        assert_eq!(level.player_start(), CellCoord::new(1, 1));
        assert_eq!(level.name(), Some("sample"));
    }

    #[test]
    fn every_code_up_to_the_maximum_decodes() {
        for code in 0..=MAX_TILE_CODE {
            assert!(decode_tile(code).is_some(), "code {code} should decode");
        }
        assert_eq!(decode_tile(MAX_TILE_CODE + 1), None);
    }

    #[test]
    fn empty_tables_are_rejected() {
        let table: [[u8; 0]; 0] = [];
        assert_eq!(Level::from_codes(&table), Err(LevelError::Empty));
        let table: [[u8; 0]; 2] = [[], []];
        assert_eq!(Level::from_codes(&table), Err(LevelError::Empty));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let table: [&[u8]; 2] = [&[2, 3, 2], &[2, 2]];
        assert_eq!(
            Level::from_codes(&table),
            Err(LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn unknown_codes_report_their_position() {
        let table: [[u8; 2]; 2] = [[2, 3], [12, 2]];
        assert_eq!(
            Level::from_codes(&table),
            Err(LevelError::UnknownTile {
                code: 12,
                column: 0,
                row: 1,
            })
        );
    }

    #[test]
    fn player_marker_must_be_unique() {
        let missing: [[u8; 2]; 2] = [[2, 2], [0, 1]];
        assert_eq!(Level::from_codes(&missing), Err(LevelError::MissingPlayer));
        let duplicated: [[u8; 2]; 2] = [[3, 2], [2, 3]];
        assert_eq!(
            Level::from_codes(&duplicated),
            Err(LevelError::DuplicatePlayer {
                first: CellCoord::new(0, 0),
                second: CellCoord::new(1, 1),
            })
        );
    }

    #[test]
    fn errors_describe_the_invalid_level() {
        let error = LevelError::RaggedRow {
            row: 4,
            expected: 8,
            found: 7,
        };
        assert_eq!(
            error.to_string(),
            "invalid level: row 4 has 7 cells, expected 8"
        );
    }
}
