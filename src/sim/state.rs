//! Game state and status
//!
//! A `GameState` is a snapshot: stepping the simulation builds a new one.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::actor::{Actor, Player};
use super::level::Level;

/// Where an attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    /// Final result, `None` while still playing
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Won => Some(Outcome::Won),
            GameStatus::Lost => Some(Outcome::Lost),
        }
    }
}

/// Result of a finished attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Complete game state for one attempt at a level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    /// Shared, never modified after parsing
    pub level: Arc<Level>,
    /// Actors in spawn order
    pub actors: Vec<Actor>,
    pub status: GameStatus,
}

impl GameState {
    /// Start an attempt at a level
    ///
    /// Actors are spawned from the level's descriptors, ids in spawn order.
    /// The seed drives the coins' starting wobble phases.
    pub fn start(level: Arc<Level>, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let actors = level
            .start_actors
            .iter()
            .zip(0u32..)
            .map(|(spawn, id)| Actor::spawn(id, spawn, &mut rng))
            .collect();
        Self {
            level,
            actors,
            status: GameStatus::Playing,
        }
    }

    /// The player actor
    ///
    /// Levels always contain exactly one player, so a state without one is a
    /// bug.
    pub fn player(&self) -> &Player {
        self.actors
            .iter()
            .find_map(|actor| match actor {
                Actor::Player(player) => Some(player),
                _ => None,
            })
            .expect("game state has no player")
    }

    /// Number of coins still to collect
    pub fn coins_left(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| matches!(a, Actor::Coin(_)))
            .count()
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
