//! Player position tracking; all movement is delegated to the grid.

use rockfall_core::{CellCoord, Event, Input, Surface, SurfaceRect, TileColor};

use crate::{grid::Grid, tile::Tile};

const PLAYER_COLOR: TileColor = TileColor::from_hex(0xff0000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Player {
    cell: CellCoord,
}

impl Player {
    pub(crate) const fn new(cell: CellCoord) -> Self {
        Self { cell }
    }

    pub(crate) const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Translates a directional input into a single unit move.
    pub(crate) fn handle(&mut self, grid: &mut Grid, input: Input, out_events: &mut Vec<Event>) {
        match input {
            Input::Up => self.move_vertical(grid, -1, out_events),
            Input::Down => self.move_vertical(grid, 1, out_events),
            Input::Left => self.move_horizontal(grid, -1, out_events),
            Input::Right => self.move_horizontal(grid, 1, out_events),
        }
    }

    fn move_horizontal(&mut self, grid: &mut Grid, dx: i32, out_events: &mut Vec<Event>) {
        grid.move_horizontal(self, dx, out_events);
    }

    fn move_vertical(&mut self, grid: &mut Grid, dy: i32, out_events: &mut Vec<Event>) {
        grid.move_vertical(self, dy, out_events);
    }

    pub(crate) fn push_horizontal(
        &mut self,
        grid: &mut Grid,
        tile: Tile,
        dx: i32,
        out_events: &mut Vec<Event>,
    ) {
        grid.push_horizontal(self, tile, dx, out_events);
    }

    /// Moves the marker on the grid and the tracked position together.
    pub(crate) fn move_to_tile(
        &mut self,
        grid: &mut Grid,
        destination: CellCoord,
        out_events: &mut Vec<Event>,
    ) {
        let from = self.cell;
        grid.move_player(from, destination);
        self.cell = destination;
        out_events.push(Event::PlayerMoved {
            from,
            to: destination,
        });
    }

    pub(crate) fn step(&mut self, grid: &mut Grid, dx: i32, dy: i32, out_events: &mut Vec<Event>) {
        if let Some(destination) = grid.neighbour(self.cell, dx, dy) {
            self.move_to_tile(grid, destination, out_events);
        }
    }

    pub(crate) fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_rect(SurfaceRect::for_cell(self.cell), PLAYER_COLOR);
    }
}
