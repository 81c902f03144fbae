#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Rockfall experience.

use rockfall_core::TileGrid;
use rockfall_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the tile grid configuration required for rendering.
    #[must_use]
    pub fn tile_grid(&self, world: &World) -> TileGrid {
        query::tile_grid(world)
    }

    /// Builds the window title, naming the level when it has a name.
    #[must_use]
    pub fn window_title(&self, world: &World) -> String {
        match query::level_name(world) {
            Some(name) => format!("Rockfall - {name}"),
            None => "Rockfall".to_owned(),
        }
    }
}
