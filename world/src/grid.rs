//! Dense tile storage and the grid-level operations tiles delegate to.

use rockfall_core::{CellCoord, Event, FallingState, Surface};

use crate::{level::Level, player::Player, tile::KeyConfiguration, tile::Tile};

/// Row-major tile grid; row zero is the top of the level.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Tile>,
}

impl Grid {
    pub(crate) fn from_level(level: &Level) -> Self {
        Self {
            columns: level.columns(),
            rows: level.rows(),
            cells: level.tiles().to_vec(),
        }
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub(crate) fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub(crate) fn get(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    pub(crate) fn set(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Gravity pass: bottom row first so a block never moves twice per tick.
    pub(crate) fn update(&mut self, out_events: &mut Vec<Event>) {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let cell = CellCoord::new(column, row);
                if let Some(tile) = self.get(cell) {
                    tile.update(self, cell, out_events);
                }
            }
        }
    }

    pub(crate) fn draw<S: Surface>(&self, surface: &mut S) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = CellCoord::new(column, row);
                if let Some(tile) = self.get(cell) {
                    tile.draw(surface, cell);
                }
            }
        }
    }

    /// Moves `tile` from `cell` into the row below, leaving air behind.
    pub(crate) fn drop(&mut self, tile: Tile, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(below) = self.below(cell) else {
            return;
        };
        self.set(below, tile);
        self.set(cell, Tile::Air);
        out_events.push(Event::BlockFell {
            from: cell,
            to: below,
        });
    }

    /// State a block at `cell` should adopt given the tile underneath it.
    ///
    /// The edge below the last row supports blocks like a wall would.
    pub(crate) fn state_for_block_above(&self, cell: CellCoord) -> FallingState {
        self.below(cell)
            .and_then(|below| self.get(below))
            .map_or(FallingState::Resting, |tile| tile.block_on_top_state())
    }

    pub(crate) fn move_player(&mut self, from: CellCoord, to: CellCoord) {
        self.set(from, Tile::Air);
        self.set(to, Tile::PlayerMarker);
    }

    /// Asks the tile beside the player what a sideways step does.
    ///
    /// A destination outside the grid leaves everything untouched.
    pub(crate) fn move_horizontal(
        &mut self,
        player: &mut Player,
        dx: i32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(destination) = self.neighbour(player.cell(), dx, 0) else {
            return;
        };
        if let Some(tile) = self.get(destination) {
            tile.move_horizontal(self, player, dx, out_events);
        }
    }

    /// Asks the tile above or below the player what a vertical step does.
    ///
    /// A destination outside the grid leaves everything untouched.
    pub(crate) fn move_vertical(
        &mut self,
        player: &mut Player,
        dy: i32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(destination) = self.neighbour(player.cell(), 0, dy) else {
            return;
        };
        if let Some(tile) = self.get(destination) {
            tile.move_vertical(self, player, dy, out_events);
        }
    }

    /// Replaces every tile matching `should_remove` with air, returning the count.
    pub(crate) fn remove<F>(&mut self, mut should_remove: F) -> u32
    where
        F: FnMut(&Tile) -> bool,
    {
        let mut removed = 0;
        for slot in &mut self.cells {
            if should_remove(slot) {
                *slot = Tile::Air;
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn remove_locks(
        &mut self,
        configuration: &KeyConfiguration,
        out_events: &mut Vec<Event>,
    ) {
        let strategy = configuration.remove_strategy();
        let count = self.remove(|tile| strategy.check(tile));
        out_events.push(Event::LocksRemoved {
            key: configuration.identity(),
            count,
        });
    }

    /// Pushes the resting `tile` beside the player one cell further and steps
    /// the player into the vacated cell as a single transaction.
    ///
    /// The landing cell must be air and must have something other than air
    /// beneath it; otherwise neither the block nor the player moves.
    pub(crate) fn push_horizontal(
        &mut self,
        player: &mut Player,
        tile: Tile,
        dx: i32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(block) = self.neighbour(player.cell(), dx, 0) else {
            return;
        };
        let landing = self.neighbour(block, dx, 0);
        let landing_is_air = landing
            .and_then(|cell| self.get(cell))
            .is_some_and(|target| target.is_air());
        let supported = landing
            .map(|cell| self.state_for_block_above(cell) == FallingState::Resting)
            .unwrap_or(false);

        match landing {
            Some(landing) if landing_is_air && supported => {
                self.set(landing, tile);
                out_events.push(Event::BlockPushed {
                    from: block,
                    to: landing,
                });
                player.move_to_tile(self, block, out_events);
            }
            _ => out_events.push(Event::PushRejected { at: block }),
        }
    }

    /// Neighbouring cell inside the grid, if one exists.
    pub(crate) fn neighbour(&self, cell: CellCoord, dx: i32, dy: i32) -> Option<CellCoord> {
        cell.offset(dx, dy).filter(|next| self.contains(*next))
    }

    fn below(&self, cell: CellCoord) -> Option<CellCoord> {
        cell.below().filter(|next| self.contains(*next))
    }

    fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{BLUE_KEY, YELLOW_KEY};

    fn grid(codes: &[&[u8]]) -> Grid {
        let level = Level::from_codes(codes).expect("valid level");
        Grid::from_level(&level)
    }

    #[test]
    fn out_of_bounds_reads_return_none() {
        let grid = grid(&[&[2, 2], &[3, 2]]);
        assert_eq!(grid.get(CellCoord::new(2, 0)), None);
        assert_eq!(grid.get(CellCoord::new(0, 2)), None);
        assert_eq!(grid.neighbour(CellCoord::new(0, 0), -1, 0), None);
    }

    #[test]
    fn bottom_edge_supports_blocks() {
        let grid = grid(&[&[3, 0], &[0, 4]]);
        assert_eq!(
            grid.state_for_block_above(CellCoord::new(1, 1)),
            FallingState::Resting
        );
        assert_eq!(
            grid.state_for_block_above(CellCoord::new(1, 0)),
            FallingState::Resting
        );
        assert_eq!(
            grid.state_for_block_above(CellCoord::new(0, 0)),
            FallingState::Falling
        );
    }

    #[test]
    fn drop_moves_tile_down_and_leaves_air() {
        let mut grid = grid(&[&[3, 4], &[2, 0]]);
        let mut events = Vec::new();
        let stone = Tile::Stone(FallingState::Falling);
        grid.drop(stone, CellCoord::new(1, 0), &mut events);

        assert_eq!(grid.get(CellCoord::new(1, 0)), Some(Tile::Air));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(stone));
        assert_eq!(
            events,
            vec![Event::BlockFell {
                from: CellCoord::new(1, 0),
                to: CellCoord::new(1, 1),
            }]
        );
    }

    #[test]
    fn drop_from_the_bottom_row_is_ignored() {
        let mut grid = grid(&[&[3, 0], &[2, 4]]);
        let mut events = Vec::new();
        grid.drop(Tile::Stone(FallingState::Falling), CellCoord::new(1, 1), &mut events);

        assert_eq!(
            grid.get(CellCoord::new(1, 1)),
            Some(Tile::Stone(FallingState::Resting))
        );
        assert!(events.is_empty());
    }

    #[test]
    fn remove_clears_only_matching_tiles() {
        let mut grid = grid(&[&[3, 9, 11, 9], &[2, 8, 10, 2]]);
        let removed = grid.remove(|tile| YELLOW_KEY.remove_strategy().check(tile));

        assert_eq!(removed, 2);
        assert_eq!(grid.get(CellCoord::new(1, 0)), Some(Tile::Air));
        assert_eq!(grid.get(CellCoord::new(3, 0)), Some(Tile::Air));
        assert_eq!(grid.get(CellCoord::new(2, 0)), Some(Tile::Lock(&BLUE_KEY)));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(Tile::Key(&YELLOW_KEY)));
    }

    #[test]
    fn draw_walks_rows_top_to_bottom() {
        use rockfall_core::{SurfaceRect, TileColor};

        #[derive(Default)]
        struct Cells(Vec<SurfaceRect>);

        impl Surface for Cells {
            fn clear(&mut self) {
                self.0.clear();
            }

            fn fill_rect(&mut self, rect: SurfaceRect, _color: TileColor) {
                self.0.push(rect);
            }
        }

        let grid = grid(&[&[2, 3], &[1, 2]]);
        let mut surface = Cells::default();
        grid.draw(&mut surface);

        assert_eq!(
            surface.0,
            vec![
                SurfaceRect::for_cell(CellCoord::new(0, 0)),
                SurfaceRect::for_cell(CellCoord::new(0, 1)),
                SurfaceRect::for_cell(CellCoord::new(1, 1)),
            ]
        );
    }
}
