//! Headless replay of scripted moves with a text rendering of the result.

use anyhow::{bail, Result};
use rockfall_core::Input;
use rockfall_world::{query, Tile, World};

/// One tick of a replay script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReplayStep {
    /// Queue the input, then tick.
    Move(Input),
    /// Tick without input.
    Idle,
}

/// Parses `U`, `D`, `L`, `R` and `.` into replay steps; whitespace is ignored.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::with_capacity(script.len());
    for (position, symbol) in script.char_indices() {
        let step = match symbol.to_ascii_uppercase() {
            'U' => ReplayStep::Move(Input::Up),
            'D' => ReplayStep::Move(Input::Down),
            'L' => ReplayStep::Move(Input::Left),
            'R' => ReplayStep::Move(Input::Right),
            '.' => ReplayStep::Idle,
            symbol if symbol.is_whitespace() => continue,
            _ => bail!("unexpected replay symbol `{symbol}` at position {position}"),
        };
        steps.push(step);
    }
    Ok(steps)
}

/// Renders the grid as one line of glyphs per row.
pub(crate) fn render_text(world: &World) -> String {
    query::rows(world)
        .map(|row| row.iter().copied().map(glyph).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Air => ' ',
        Tile::Flux => '.',
        Tile::Unbreakable => '#',
        Tile::PlayerMarker => '@',
        Tile::Stone(_) => 'O',
        Tile::Box(_) => 'X',
        Tile::Key(configuration) if configuration.is_first() => 'y',
        Tile::Key(_) => 'b',
        Tile::Lock(configuration) if configuration.is_first() => 'Y',
        Tile::Lock(_) => 'B',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_dots_and_whitespace() {
        let steps = parse_moves("rR d .\nu").expect("valid script");
        assert_eq!(
            steps,
            vec![
                ReplayStep::Move(Input::Right),
                ReplayStep::Move(Input::Right),
                ReplayStep::Move(Input::Down),
                ReplayStep::Idle,
                ReplayStep::Move(Input::Up),
            ]
        );
    }

    #[test]
    fn rejects_unknown_symbols_with_their_position() {
        let error = parse_moves("RRx").expect_err("x is not a move");
        assert_eq!(
            error.to_string(),
            "unexpected replay symbol `x` at position 2"
        );
    }

    #[test]
    fn renders_the_sample_level() {
        let world = World::new();
        let expected = [
            "########",
            "#@ ..# #",
            "#O#X.# #",
            "#yO..# #",
            "#O...Y #",
            "########",
        ]
        .join("\n");
        assert_eq!(render_text(&world), expected);
    }
}
