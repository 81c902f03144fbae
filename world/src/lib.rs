#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rockfall.
//!
//! The world owns the tile grid and the player. Movement uses destination
//! dispatch: the grid looks up the tile the player is stepping into and lets
//! that tile decide whether the player walks in, pushes it, collects it or is
//! blocked. Gravity runs once per [`Command::Tick`] over the whole grid.

mod grid;
mod level;
mod player;
mod tile;

use rockfall_core::{Command, Event, Surface, WELCOME_BANNER};

use self::{grid::Grid, player::Player};

pub use self::{
    level::{decode_tile, Level, LevelError, MAX_TILE_CODE, SAMPLE_LEVEL},
    tile::{KeyConfiguration, RemoveStrategy, Tile, BLUE_KEY, YELLOW_KEY},
};

/// Represents the authoritative Rockfall world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    level_name: Option<String>,
    grid: Grid,
    player: Player,
    tick_index: u64,
}

impl World {
    /// Creates a world seeded with the built-in sample level.
    #[must_use]
    pub fn new() -> Self {
        Self::from_level(&Level::sample())
    }

    /// Creates a world seeded with the provided level.
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        Self {
            banner: WELCOME_BANNER,
            level_name: level.name().map(str::to_owned),
            grid: Grid::from_level(level),
            player: Player::new(level.player_start()),
            tick_index: 0,
        }
    }

    /// Clears the surface, paints every tile row by row, then the player.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.clear();
        self.grid.draw(surface);
        self.player.draw(surface);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { input } => {
            let before = world.player.cell();
            world.player.handle(&mut world.grid, input, out_events);
            if world.player.cell() == before {
                out_events.push(Event::MoveBlocked { input, at: before });
            }
        }
        Command::Tick => {
            world.grid.update(out_events);
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use rockfall_core::{CellCoord, TileGrid, TILE_SIZE};

    use super::{Tile, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Name of the loaded level, if it carried one.
    #[must_use]
    pub fn level_name(world: &World) -> Option<&str> {
        world.level_name.as_deref()
    }

    /// Describes the grid dimensions at [`TILE_SIZE`] resolution.
    #[must_use]
    pub fn tile_grid(world: &World) -> TileGrid {
        let (columns, rows) = world.grid.dimensions();
        TileGrid::new(columns, rows, TILE_SIZE)
    }

    /// Tile stored at the provided cell, `None` outside the grid.
    #[must_use]
    pub fn tile_at(world: &World, cell: CellCoord) -> Option<Tile> {
        world.grid.get(cell)
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell()
    }

    /// Number of ticks the world has processed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Iterator over the grid rows from top to bottom.
    pub fn rows(world: &World) -> impl Iterator<Item = &[Tile]> {
        let (columns, _) = world.grid.dimensions();
        let width = usize::try_from(columns).unwrap_or(usize::MAX).max(1);
        world.grid.cells().chunks(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rockfall_core::{CellCoord, FallingState, Input, SurfaceRect, TileColor};

    fn world(codes: &[&[u8]]) -> World {
        World::from_level(&Level::from_codes(codes).expect("valid level"))
    }

    fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, *command, &mut events);
        }
        events
    }

    #[test]
    fn new_world_uses_sample_level() {
        let world = World::new();
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::level_name(&world), Some("sample"));
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 1));
        let grid = query::tile_grid(&world);
        assert_eq!((grid.columns(), grid.rows()), (8, 6));
        assert_eq!(query::rows(&world).count(), 6);
    }

    #[test]
    fn sample_level_is_at_rest_on_first_tick() {
        let mut world = World::new();
        let events = run(&mut world, &[Command::Tick]);
        assert_eq!(events, vec![Event::TimeAdvanced { tick: 1 }]);
        assert_eq!(query::tick_index(&world), 1);
    }

    #[test]
    fn tick_records_fresh_state_on_resting_blocks() {
        let mut world = world(&[&[2, 3, 2], &[2, 5, 2], &[2, 2, 2]]);
        let _ = run(&mut world, &[Command::Tick]);
        assert_eq!(
            query::tile_at(&world, CellCoord::new(1, 1)),
            Some(Tile::Stone(FallingState::Resting))
        );
    }

    #[test]
    fn moving_off_the_grid_is_blocked() {
        let mut world = world(&[&[3, 1]]);
        let events = run(
            &mut world,
            &[
                Command::Move { input: Input::Left },
                Command::Move { input: Input::Up },
            ],
        );
        assert_eq!(
            events,
            vec![
                Event::MoveBlocked {
                    input: Input::Left,
                    at: CellCoord::new(0, 0),
                },
                Event::MoveBlocked {
                    input: Input::Up,
                    at: CellCoord::new(0, 0),
                },
            ]
        );
        assert_eq!(
            query::tile_at(&world, CellCoord::new(0, 0)),
            Some(Tile::PlayerMarker)
        );
    }

    #[derive(Default)]
    struct RecordingSurface {
        cleared: usize,
        rects: Vec<(SurfaceRect, TileColor)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.cleared += 1;
            self.rects.clear();
        }

        fn fill_rect(&mut self, rect: SurfaceRect, color: TileColor) {
            self.rects.push((rect, color));
        }
    }

    #[test]
    fn draw_paints_player_last_in_red() {
        let world = world(&[&[2, 3, 1]]);
        let mut surface = RecordingSurface::default();
        surface.rects.push((
            SurfaceRect::for_cell(CellCoord::new(9, 9)),
            TileColor::from_hex(0),
        ));
        world.draw(&mut surface);

        assert_eq!(surface.cleared, 1);
        assert_eq!(
            surface.rects,
            vec![
                (
                    SurfaceRect::for_cell(CellCoord::new(0, 0)),
                    TileColor::from_hex(0x999999)
                ),
                (
                    SurfaceRect::for_cell(CellCoord::new(2, 0)),
                    TileColor::from_hex(0xccffcc)
                ),
                (
                    SurfaceRect::for_cell(CellCoord::new(1, 0)),
                    TileColor::from_hex(0xff0000)
                ),
            ]
        );
    }
}
