//! TOML level files.
//!
//! ```toml
//! version = 1
//! name = "first steps"
//! rows = [
//!     [2, 2, 2, 2],
//!     [2, 3, 0, 2],
//!     [2, 2, 2, 2],
//! ]
//! ```

use std::{ffi::OsStr, fs, path::Path};

use anyhow::{bail, Context, Result};
use rockfall_world::Level;
use serde::Deserialize;

const SUPPORTED_LEVEL_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    version: u32,
    name: Option<String>,
    rows: Vec<Vec<u8>>,
}

/// Reads and validates the level stored at `path`.
///
/// Levels without a `name` are named after the file stem.
pub(crate) fn load_level(path: &Path) -> Result<Level> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    let fallback_name = path.file_stem().and_then(OsStr::to_str);
    parse_level(&contents, fallback_name)
        .with_context(|| format!("failed to load level from {}", path.display()))
}

fn parse_level(contents: &str, fallback_name: Option<&str>) -> Result<Level> {
    let file: LevelFile =
        toml::from_str(contents).context("failed to parse level toml contents")?;
    if file.version != SUPPORTED_LEVEL_VERSION {
        bail!(
            "unsupported level version {}; expected {}",
            file.version,
            SUPPORTED_LEVEL_VERSION
        );
    }

    let level = Level::from_codes(&file.rows)?;
    let name = file.name.or_else(|| fallback_name.map(str::to_owned));
    Ok(match name {
        Some(name) => level.with_name(name),
        None => level,
    })
}
