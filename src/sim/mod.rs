//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Each step is a function of (state, elapsed time, input)
//! - Seeded RNG only
//! - Actors keep their spawn order
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, Coin, Lava, Player};
pub use collision::{actors_overlap, overlap};
pub use level::{ActorSpawn, LavaMotion, Level, LevelFormatError, SpawnKind, Tile};
pub use state::{GameState, GameStatus, Outcome};
pub use tick::TickInput;
