//! Per-cell tile variants and the behaviour each one contributes to movement,
//! gravity and drawing.

use rockfall_core::{
    CellCoord, Event, FallingState, KeyIdentity, Surface, SurfaceRect, TileColor,
};

use crate::{grid::Grid, player::Player};

const FLUX_COLOR: TileColor = TileColor::from_hex(0xccffcc);
const UNBREAKABLE_COLOR: TileColor = TileColor::from_hex(0x999999);
const STONE_COLOR: TileColor = TileColor::from_hex(0x0000cc);
const BOX_COLOR: TileColor = TileColor::from_hex(0x8b4513);

/// Yellow key family; its key clears every lock classified as `lock1`.
pub static YELLOW_KEY: KeyConfiguration = KeyConfiguration::new(
    TileColor::from_hex(0xffcc00),
    KeyIdentity::One,
    RemoveStrategy::Lock1,
);

/// Blue key family; its key clears every lock classified as `lock2`.
pub static BLUE_KEY: KeyConfiguration = KeyConfiguration::new(
    TileColor::from_hex(0x00ccff),
    KeyIdentity::Two,
    RemoveStrategy::Lock2,
);

/// Rule deciding which tiles a collected key clears from the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveStrategy {
    /// Removes tiles that classify as `lock1`.
    Lock1,
    /// Removes tiles that classify as `lock2`.
    Lock2,
}

impl RemoveStrategy {
    /// Reports whether the tile should be replaced with air.
    #[must_use]
    pub fn check(self, tile: &Tile) -> bool {
        match self {
            Self::Lock1 => tile.is_lock1(),
            Self::Lock2 => tile.is_lock2(),
        }
    }
}

/// Immutable descriptor shared by a key and the locks it opens.
///
/// Tiles hold `&'static` references to one of the [`YELLOW_KEY`] or
/// [`BLUE_KEY`] singletons rather than owning a copy.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyConfiguration {
    color: TileColor,
    identity: KeyIdentity,
    remove_strategy: RemoveStrategy,
}

impl KeyConfiguration {
    /// Creates a new key configuration.
    #[must_use]
    pub const fn new(
        color: TileColor,
        identity: KeyIdentity,
        remove_strategy: RemoveStrategy,
    ) -> Self {
        Self {
            color,
            identity,
            remove_strategy,
        }
    }

    /// Fill color used for both the key and its locks.
    #[must_use]
    pub const fn color(&self) -> TileColor {
        self.color
    }

    /// Family this configuration belongs to.
    #[must_use]
    pub const fn identity(&self) -> KeyIdentity {
        self.identity
    }

    /// Reports whether this is the first (`key1`) family.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        matches!(self.identity, KeyIdentity::One)
    }

    /// Lock-removal predicate applied when the key is collected.
    #[must_use]
    pub const fn remove_strategy(&self) -> RemoveStrategy {
        self.remove_strategy
    }
}

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// Empty space; blocks fall through it and the player walks into it.
    Air,
    /// Walkable path tile that supports blocks.
    Flux,
    /// Solid wall.
    Unbreakable,
    /// Marks the cell occupied by the player.
    PlayerMarker,
    /// Heavy block subject to gravity.
    Stone(FallingState),
    /// Wooden block subject to gravity.
    Box(FallingState),
    /// Collectible key that clears its matching locks.
    Key(&'static KeyConfiguration),
    /// Barrier removed when the matching key is collected.
    Lock(&'static KeyConfiguration),
}

impl Tile {
    /// Reports whether the tile is air.
    #[must_use]
    pub const fn is_air(&self) -> bool {
        matches!(self, Self::Air)
    }

    /// Reports whether the tile is flux.
    #[must_use]
    pub const fn is_flux(&self) -> bool {
        matches!(self, Self::Flux)
    }

    /// Reports whether the tile is an unbreakable wall.
    #[must_use]
    pub const fn is_unbreakable(&self) -> bool {
        matches!(self, Self::Unbreakable)
    }

    /// Reports whether the tile marks the player's cell.
    ///
    /// Only [`Tile::PlayerMarker`] answers `true`.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self, Self::PlayerMarker)
    }

    /// Reports whether the tile is a lock of the first family.
    #[must_use]
    pub const fn is_lock1(&self) -> bool {
        match self {
            Self::Lock(configuration) => configuration.is_first(),
            _ => false,
        }
    }

    /// Reports whether the tile is a lock of the second family.
    #[must_use]
    pub const fn is_lock2(&self) -> bool {
        match self {
            Self::Lock(configuration) => !configuration.is_first(),
            _ => false,
        }
    }

    /// Color painted for the tile, `None` when the tile paints nothing.
    #[must_use]
    pub const fn color(&self) -> Option<TileColor> {
        match self {
            Self::Air | Self::PlayerMarker => None,
            Self::Flux => Some(FLUX_COLOR),
            Self::Unbreakable => Some(UNBREAKABLE_COLOR),
            Self::Stone(_) => Some(STONE_COLOR),
            Self::Box(_) => Some(BOX_COLOR),
            Self::Key(configuration) | Self::Lock(configuration) => Some(configuration.color()),
        }
    }

    /// State a stone or box resting directly above this tile should adopt.
    #[must_use]
    pub const fn block_on_top_state(&self) -> FallingState {
        match self {
            Self::Air => FallingState::Falling,
            _ => FallingState::Resting,
        }
    }

    /// Paints the tile into the cell-sized rectangle at `cell`.
    pub fn draw<S: Surface>(&self, surface: &mut S, cell: CellCoord) {
        if let Some(color) = self.color() {
            surface.fill_rect(SurfaceRect::for_cell(cell), color);
        }
    }

    /// Reacts to the player trying to enter this tile sideways.
    pub(crate) fn move_horizontal(
        self,
        grid: &mut Grid,
        player: &mut Player,
        dx: i32,
        out_events: &mut Vec<Event>,
    ) {
        match self {
            Self::Air | Self::Flux => player.step(grid, dx, 0, out_events),
            Self::Unbreakable | Self::PlayerMarker | Self::Lock(_) => {}
            Self::Stone(state) | Self::Box(state) => match state {
                FallingState::Resting => player.push_horizontal(grid, self, dx, out_events),
                FallingState::Falling => {}
            },
            Self::Key(configuration) => {
                grid.remove_locks(configuration, out_events);
                player.step(grid, dx, 0, out_events);
            }
        }
    }

    /// Reacts to the player trying to enter this tile from above or below.
    pub(crate) fn move_vertical(
        self,
        grid: &mut Grid,
        player: &mut Player,
        dy: i32,
        out_events: &mut Vec<Event>,
    ) {
        match self {
            Self::Air | Self::Flux => player.step(grid, 0, dy, out_events),
            Self::Unbreakable
            | Self::PlayerMarker
            | Self::Lock(_)
            | Self::Stone(_)
            | Self::Box(_) => {}
            Self::Key(configuration) => {
                grid.remove_locks(configuration, out_events);
                player.step(grid, 0, dy, out_events);
            }
        }
    }

    /// Runs the per-tick gravity step for the tile located at `cell`.
    pub(crate) fn update(self, grid: &mut Grid, cell: CellCoord, out_events: &mut Vec<Event>) {
        match self {
            Self::Stone(_) => fall(grid, cell, Self::Stone, out_events),
            Self::Box(_) => fall(grid, cell, Self::Box, out_events),
            Self::Air
            | Self::Flux
            | Self::Unbreakable
            | Self::PlayerMarker
            | Self::Key(_)
            | Self::Lock(_) => {}
        }
    }
}

/// Re-derives the block's state from the cell below, then acts on it at once.
fn fall(
    grid: &mut Grid,
    cell: CellCoord,
    block: fn(FallingState) -> Tile,
    out_events: &mut Vec<Event>,
) {
    let state = grid.state_for_block_above(cell);
    let tile = block(state);
    match state {
        FallingState::Falling => grid.drop(tile, cell, out_events),
        FallingState::Resting => grid.set(cell, tile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> [Tile; 10] {
        [
            Tile::Air,
            Tile::Flux,
            Tile::Unbreakable,
            Tile::PlayerMarker,
            Tile::Stone(FallingState::Resting),
            Tile::Box(FallingState::Falling),
            Tile::Key(&YELLOW_KEY),
            Tile::Lock(&YELLOW_KEY),
            Tile::Key(&BLUE_KEY),
            Tile::Lock(&BLUE_KEY),
        ]
    }

    #[test]
    fn at_most_one_classification_matches_each_variant() {
        for tile in all_variants() {
            let matches = [
                tile.is_air(),
                tile.is_flux(),
                tile.is_unbreakable(),
                tile.is_player(),
                tile.is_lock1(),
                tile.is_lock2(),
            ]
            .into_iter()
            .filter(|flag| *flag)
            .count();
            assert!(matches <= 1, "{tile:?} matched {matches} classifications");
        }
    }

    #[test]
    fn only_the_marker_classifies_as_player() {
        let players: Vec<Tile> = all_variants()
            .into_iter()
            .filter(Tile::is_player)
            .collect();
        assert_eq!(players, vec![Tile::PlayerMarker]);
    }

    #[test]
    fn locks_classify_by_key_family() {
        assert!(Tile::Lock(&YELLOW_KEY).is_lock1());
        assert!(!Tile::Lock(&YELLOW_KEY).is_lock2());
        assert!(Tile::Lock(&BLUE_KEY).is_lock2());
        assert!(!Tile::Key(&YELLOW_KEY).is_lock1());
    }

    #[test]
    fn remove_strategies_target_their_family_only() {
        let yellow = YELLOW_KEY.remove_strategy();
        assert!(yellow.check(&Tile::Lock(&YELLOW_KEY)));
        assert!(!yellow.check(&Tile::Lock(&BLUE_KEY)));
        assert!(!yellow.check(&Tile::Key(&YELLOW_KEY)));
        assert!(BLUE_KEY.remove_strategy().check(&Tile::Lock(&BLUE_KEY)));
    }

    #[test]
    fn only_air_lets_blocks_fall() {
        for tile in all_variants() {
            let expected = if tile.is_air() {
                FallingState::Falling
            } else {
                FallingState::Resting
            };
            assert_eq!(tile.block_on_top_state(), expected, "{tile:?}");
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        rects: Vec<(SurfaceRect, TileColor)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.rects.clear();
        }

        fn fill_rect(&mut self, rect: SurfaceRect, color: TileColor) {
            self.rects.push((rect, color));
        }
    }

    #[test]
    fn air_and_marker_paint_nothing() {
        let mut surface = RecordingSurface::default();
        Tile::Air.draw(&mut surface, CellCoord::new(0, 0));
        Tile::PlayerMarker.draw(&mut surface, CellCoord::new(1, 0));
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn keys_and_locks_share_their_configuration_color() {
        let mut surface = RecordingSurface::default();
        let cell = CellCoord::new(2, 1);
        Tile::Key(&BLUE_KEY).draw(&mut surface, cell);
        Tile::Lock(&BLUE_KEY).draw(&mut surface, cell);
        let expected = TileColor::from_hex(0x00ccff);
        assert_eq!(
            surface.rects,
            vec![
                (SurfaceRect::for_cell(cell), expected),
                (SurfaceRect::for_cell(cell), expected)
            ]
        );
    }
}
