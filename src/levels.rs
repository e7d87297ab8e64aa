//! Bundled level plans and custom level packs
//!
//! Plan symbols: `.` empty, `#` wall, `+` lava, `@` player, `o` coin,
//! `=` sideways lava, `|` up-and-down lava, `v` dripping lava.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Level, LevelFormatError};

/// A small level with a lava pit and a sideways lava block
pub const SIMPLE_LEVEL: &str = "
......................
..#................#..
..#..............=.#..
..#.........o.o....#..
..#.@......#####...#..
..#####............#..
......#++++++++++++#..
......##############..
......................";

/// Two ledges over a lava floor, guarded by a patrolling lava block
pub const LEDGES_LEVEL: &str = "
..........................
..#....................#..
..#.......o......o.....#..
..#.....####...=####...#..
..#....................#..
..#.@..................#..
..####....o.......o..###..
..#..#++++++####+++++#.#..
..#..#################.#..
..........................";

/// A shaft with dripping lava
pub const DRIP_LEVEL: &str = "
......................
.#..................#.
.#..v......v.....o..#.
.#..................#.
.#........|.........#.
.#..o...........#####.
.#@.....#####.......#.
.##########.........#.
.........#++++++++++#.
.........############.";

/// Levels played in order by default
pub const GAME_LEVELS: &[&str] = &[SIMPLE_LEVEL, LEDGES_LEVEL, DRIP_LEVEL];

/// Parse the bundled levels
pub fn game_levels() -> Vec<Arc<Level>> {
    GAME_LEVELS
        .iter()
        .map(|plan| Level::parse(plan).map(Arc::new))
        .collect::<Result<_, _>>()
        .expect("bundled levels are valid")
}

/// Errors loading a level pack
#[derive(Debug, Error)]
pub enum LevelPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level pack has no levels")]
    NoLevels,

    #[error("level {index}: {source}")]
    InvalidLevel {
        index: usize,
        #[source]
        source: LevelFormatError,
    },
}

/// An ordered list of level plans, as stored in JSON
///
/// ```json
/// { "levels": ["..@..\n#####", "..."] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<String>,
}

impl LevelPack {
    /// The bundled levels as a pack
    pub fn builtin() -> Self {
        Self {
            levels: GAME_LEVELS.iter().map(|plan| plan.to_string()).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LevelPackError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a pack from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelPackError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse every plan in the pack
    pub fn parse(&self) -> Result<Vec<Arc<Level>>, LevelPackError> {
        if self.levels.is_empty() {
            return Err(LevelPackError::NoLevels);
        }
        self.levels
            .iter()
            .enumerate()
            .map(|(index, plan)| {
                Level::parse(plan)
                    .map(Arc::new)
                    .map_err(|source| LevelPackError::InvalidLevel { index, source })
            })
            .collect()
    }
}
