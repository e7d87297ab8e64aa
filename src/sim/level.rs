//! Level grid and plan parsing
//!
//! A level plan is a block of equal-length rows of symbols. Static terrain
//! becomes the tile grid; actor symbols become spawn descriptors and leave an
//! empty tile behind.

use glam::DVec2;
use serde::Serialize;
use thiserror::Error;

/// Static tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Lava,
}

/// Motion pattern of a moving lava block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LavaMotion {
    /// `=`: moves sideways, bounces off walls
    Horizontal,
    /// `|`: moves up and down, bounces off walls
    Vertical,
    /// `v`: falls, and restarts from its spawn cell when it lands
    Drip,
}

/// What a spawn descriptor creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpawnKind {
    Player,
    Coin,
    Lava(LavaMotion),
}

/// An actor placement captured from the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorSpawn {
    pub kind: SpawnKind,
    /// Top-left corner of the plan cell
    pub cell: DVec2,
}

/// Reasons a level plan is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelFormatError {
    #[error("level plan is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("level has no player spawn")]
    MissingPlayer,

    #[error("second player spawn at row {row}, column {col}")]
    MultiplePlayers { row: usize, col: usize },
}

/// What a single plan symbol stands for
enum Symbol {
    Tile(Tile),
    Spawn(SpawnKind),
}

fn classify(ch: char) -> Option<Symbol> {
    let symbol = match ch {
        '.' => Symbol::Tile(Tile::Empty),
        '#' => Symbol::Tile(Tile::Wall),
        '+' => Symbol::Tile(Tile::Lava),
        '@' => Symbol::Spawn(SpawnKind::Player),
        'o' => Symbol::Spawn(SpawnKind::Coin),
        '=' => Symbol::Spawn(SpawnKind::Lava(LavaMotion::Horizontal)),
        '|' => Symbol::Spawn(SpawnKind::Lava(LavaMotion::Vertical)),
        'v' => Symbol::Spawn(SpawnKind::Lava(LavaMotion::Drip)),
        _ => return None,
    };
    Some(symbol)
}

/// Immutable tile grid plus the actors it starts with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    /// Row-major tiles, `width * height` long
    tiles: Vec<Tile>,
    /// Spawn descriptors in plan reading order
    pub start_actors: Vec<ActorSpawn>,
}

impl Level {
    /// Parse a level plan
    ///
    /// Leading and trailing whitespace around the whole plan is ignored. The
    /// plan must be rectangular, use only known symbols and contain exactly
    /// one player.
    pub fn parse(plan: &str) -> Result<Self, LevelFormatError> {
        let plan = plan.trim();
        if plan.is_empty() {
            return Err(LevelFormatError::Empty);
        }

        let rows: Vec<Vec<char>> = plan.lines().map(|line| line.chars().collect()).collect();
        let height = rows.len();
        let width = rows[0].len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut start_actors = Vec::new();
        let mut player_seen = false;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LevelFormatError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &ch) in row.iter().enumerate() {
                let symbol = classify(ch).ok_or(LevelFormatError::UnknownSymbol {
                    symbol: ch,
                    row: y,
                    col: x,
                })?;
                match symbol {
                    Symbol::Tile(tile) => tiles.push(tile),
                    Symbol::Spawn(kind) => {
                        if kind == SpawnKind::Player {
                            if player_seen {
                                return Err(LevelFormatError::MultiplePlayers { row: y, col: x });
                            }
                            player_seen = true;
                        }
                        start_actors.push(ActorSpawn {
                            kind,
                            cell: DVec2::new(x as f64, y as f64),
                        });
                        tiles.push(Tile::Empty);
                    }
                }
            }
        }

        if !player_seen {
            return Err(LevelFormatError::MissingPlayer);
        }

        log::debug!(
            "Parsed {}x{} level with {} actors",
            width,
            height,
            start_actors.len()
        );

        Ok(Self {
            width,
            height,
            tiles,
            start_actors,
        })
    }

    /// Tile at a grid cell, `None` outside the grid
    pub fn tile(&self, x: i64, y: i64) -> Option<Tile> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    /// Iterate rows of tiles, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Number of coins the level starts with
    pub fn coin_count(&self) -> usize {
        self.start_actors
            .iter()
            .filter(|spawn| spawn.kind == SpawnKind::Coin)
            .count()
    }
}

impl std::str::FromStr for Level {
    type Err = LevelFormatError;

    fn from_str(plan: &str) -> Result<Self, Self::Err> {
        Self::parse(plan)
    }
}
