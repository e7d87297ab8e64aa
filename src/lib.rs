//! Tile Platformer - a tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level grid, actors, collisions, game state)
//! - `runner`: Level attempts, level sequencing and frame timing
//! - `levels`: Bundled level plans and level packs
//! - `settings`: Run configuration

pub mod levels;
pub mod runner;
pub mod settings;
pub mod sim;

pub use levels::{GAME_LEVELS, LevelPack};
pub use runner::{FrameClock, GameRunner, LevelRun, Presenter};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Player horizontal speed (units/s)
    pub const PLAYER_X_SPEED: f64 = 7.0;
    /// Downward acceleration applied to the player (units/s²)
    pub const GRAVITY: f64 = 30.0;
    /// Upward speed given by a jump (units/s)
    pub const JUMP_SPEED: f64 = 17.0;

    /// Coin wobble angular speed (rad/s)
    pub const WOBBLE_SPEED: f64 = 8.0;
    /// Coin wobble amplitude (units)
    pub const WOBBLE_DIST: f64 = 0.07;

    /// Actor sizes
    pub const PLAYER_SIZE: DVec2 = DVec2::new(0.8, 1.5);
    pub const LAVA_SIZE: DVec2 = DVec2::new(1.0, 1.0);
    pub const COIN_SIZE: DVec2 = DVec2::new(0.6, 0.6);

    /// Spawn offsets relative to the plan cell
    pub const PLAYER_SPAWN_OFFSET: DVec2 = DVec2::new(0.0, -0.5);
    pub const COIN_SPAWN_OFFSET: DVec2 = DVec2::new(0.2, 0.1);

    /// Moving lava speeds (units/s)
    pub const LAVA_HORIZONTAL_SPEED: DVec2 = DVec2::new(2.0, 0.0);
    pub const LAVA_VERTICAL_SPEED: DVec2 = DVec2::new(0.0, 2.0);
    pub const LAVA_DRIP_SPEED: DVec2 = DVec2::new(0.0, 3.0);

    /// Longest frame the driver feeds into one step (seconds)
    pub const MAX_FRAME_SECS: f64 = 0.1;
    /// Time the final state stays up after a level is won or lost (seconds)
    pub const END_GRACE_SECS: f64 = 1.0;
}
