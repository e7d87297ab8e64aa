//! Simulation step
//!
//! Advances a game state by one elapsed-time increment.

use super::actor::Actor;
use super::collision::actors_overlap;
use super::level::Tile;
use super::state::{GameState, GameStatus};

/// Keys held during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl GameState {
    /// Advance the game by `dt` seconds
    ///
    /// Every actor moves based on the state before the step. Once the
    /// attempt is over, actors keep moving but nothing can change the status.
    /// Otherwise lava tiles under the player lose the game outright, and then
    /// every actor overlapping the player collides with it in list order.
    pub fn update(&self, dt: f64, input: &TickInput) -> GameState {
        assert!(dt.is_finite() && dt >= 0.0, "invalid step time: {dt}");

        let actors: Vec<Actor> = self
            .actors
            .iter()
            .map(|actor| actor.update(dt, self, input))
            .collect();
        let mut new_state = GameState {
            level: self.level.clone(),
            actors,
            status: self.status,
        };

        if new_state.status != GameStatus::Playing {
            return new_state;
        }

        let player = Actor::Player(new_state.player().clone());
        if self.level.touches(player.pos(), player.size(), Tile::Lava) {
            return GameState {
                status: GameStatus::Lost,
                ..new_state
            };
        }

        let others: Vec<Actor> = new_state
            .actors
            .iter()
            .filter(|actor| !matches!(actor, Actor::Player(_)) && actors_overlap(actor, &player))
            .cloned()
            .collect();
        for actor in &others {
            new_state = actor.collide(new_state);
        }
        new_state
    }
}
