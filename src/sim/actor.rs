//! Actors: the player, moving lava and coins
//!
//! Actors are values. `update` returns the actor as it is after the step and
//! `collide` returns the game state after the player has run into it.

use glam::DVec2;
use rand::Rng;
use serde::Serialize;

use super::level::{ActorSpawn, LavaMotion, Level, SpawnKind, Tile};
use super::state::{GameState, GameStatus};
use super::tick::TickInput;
use crate::consts::*;

/// The controllable actor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: u32,
    pub pos: DVec2,
    /// Momentum: x from input, y from gravity and jumps
    pub speed: DVec2,
}

impl Player {
    pub fn new(id: u32, cell: DVec2) -> Self {
        Self {
            id,
            pos: cell + PLAYER_SPAWN_OFFSET,
            speed: DVec2::ZERO,
        }
    }

    pub fn update(&self, dt: f64, level: &Level, input: &TickInput) -> Self {
        let mut x_speed = 0.0;
        if input.left {
            x_speed -= PLAYER_X_SPEED;
        }
        if input.right {
            x_speed += PLAYER_X_SPEED;
        }

        let mut pos = self.pos;
        let moved_x = pos + DVec2::new(x_speed * dt, 0.0);
        if !level.touches(moved_x, PLAYER_SIZE, Tile::Wall) {
            pos = moved_x;
        }

        let mut y_speed = self.speed.y + dt * GRAVITY;
        let moved_y = pos + DVec2::new(0.0, y_speed * dt);
        if !level.touches(moved_y, PLAYER_SIZE, Tile::Wall) {
            pos = moved_y;
        } else if input.up && y_speed > 0.0 {
            // Blocked while falling: standing on something, so jump
            y_speed = -JUMP_SPEED;
        } else {
            y_speed = 0.0;
        }

        Self {
            id: self.id,
            pos,
            speed: DVec2::new(x_speed, y_speed),
        }
    }
}

/// A moving lava block
///
/// Bounces off walls, unless it has a reset position, in which case it
/// starts over from there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lava {
    pub id: u32,
    pub pos: DVec2,
    pub speed: DVec2,
    pub reset: Option<DVec2>,
}

impl Lava {
    pub fn new(id: u32, cell: DVec2, motion: LavaMotion) -> Self {
        let (speed, reset) = match motion {
            LavaMotion::Horizontal => (LAVA_HORIZONTAL_SPEED, None),
            LavaMotion::Vertical => (LAVA_VERTICAL_SPEED, None),
            LavaMotion::Drip => (LAVA_DRIP_SPEED, Some(cell)),
        };
        Self {
            id,
            pos: cell,
            speed,
            reset,
        }
    }

    pub fn update(&self, dt: f64, level: &Level) -> Self {
        let new_pos = self.pos + self.speed * dt;
        if !level.touches(new_pos, LAVA_SIZE, Tile::Wall) {
            Self {
                pos: new_pos,
                ..self.clone()
            }
        } else if let Some(reset) = self.reset {
            Self {
                pos: reset,
                ..self.clone()
            }
        } else {
            Self {
                speed: -self.speed,
                ..self.clone()
            }
        }
    }

    /// Touching lava loses the level
    pub fn collide(&self, state: GameState) -> GameState {
        GameState {
            status: GameStatus::Lost,
            ..state
        }
    }
}

/// A wobbling coin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coin {
    pub id: u32,
    pub pos: DVec2,
    pub base_pos: DVec2,
    /// Wobble phase (radians)
    pub wobble: f64,
}

impl Coin {
    pub fn new(id: u32, cell: DVec2, wobble: f64) -> Self {
        let base_pos = cell + COIN_SPAWN_OFFSET;
        Self {
            id,
            pos: base_pos,
            base_pos,
            wobble,
        }
    }

    pub fn update(&self, dt: f64) -> Self {
        let wobble = self.wobble + dt * WOBBLE_SPEED;
        let wobble_pos = wobble.sin() * WOBBLE_DIST;
        Self {
            id: self.id,
            pos: self.base_pos + DVec2::new(0.0, wobble_pos),
            base_pos: self.base_pos,
            wobble,
        }
    }

    /// Collect this coin; collecting the last one wins the level
    pub fn collide(&self, state: GameState) -> GameState {
        let actors: Vec<Actor> = state
            .actors
            .into_iter()
            .filter(|a| !matches!(a, Actor::Coin(coin) if coin.id == self.id))
            .collect();
        let status = if actors.iter().any(|a| matches!(a, Actor::Coin(_))) {
            state.status
        } else {
            GameStatus::Won
        };
        GameState {
            level: state.level,
            actors,
            status,
        }
    }
}

/// Actor kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Player,
    Lava,
    Coin,
}

/// Any simulated entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Actor {
    Player(Player),
    Lava(Lava),
    Coin(Coin),
}

impl Actor {
    /// Create an actor from a spawn descriptor
    ///
    /// Coins take a random starting wobble phase so they don't bob in sync.
    pub fn spawn<R: Rng>(id: u32, spawn: &ActorSpawn, rng: &mut R) -> Self {
        match spawn.kind {
            SpawnKind::Player => Actor::Player(Player::new(id, spawn.cell)),
            SpawnKind::Lava(motion) => Actor::Lava(Lava::new(id, spawn.cell, motion)),
            SpawnKind::Coin => {
                let wobble = rng.random::<f64>() * std::f64::consts::TAU;
                Actor::Coin(Coin::new(id, spawn.cell, wobble))
            }
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Actor::Player(p) => p.id,
            Actor::Lava(l) => l.id,
            Actor::Coin(c) => c.id,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Player(_) => ActorKind::Player,
            Actor::Lava(_) => ActorKind::Lava,
            Actor::Coin(_) => ActorKind::Coin,
        }
    }

    /// Top-left corner
    pub fn pos(&self) -> DVec2 {
        match self {
            Actor::Player(p) => p.pos,
            Actor::Lava(l) => l.pos,
            Actor::Coin(c) => c.pos,
        }
    }

    pub fn size(&self) -> DVec2 {
        match self {
            Actor::Player(_) => PLAYER_SIZE,
            Actor::Lava(_) => LAVA_SIZE,
            Actor::Coin(_) => COIN_SIZE,
        }
    }

    /// Advance one step, reading only the pre-step state
    pub fn update(&self, dt: f64, state: &GameState, input: &TickInput) -> Self {
        match self {
            Actor::Player(p) => Actor::Player(p.update(dt, &state.level, input)),
            Actor::Lava(l) => Actor::Lava(l.update(dt, &state.level)),
            Actor::Coin(c) => Actor::Coin(c.update(dt)),
        }
    }

    /// Resolve the player running into this actor
    ///
    /// The player is never collided with itself, so it leaves the state as is.
    pub fn collide(&self, state: GameState) -> GameState {
        match self {
            Actor::Player(_) => state,
            Actor::Lava(l) => l.collide(state),
            Actor::Coin(c) => c.collide(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(plan: &str) -> Level {
        Level::parse(plan).unwrap()
    }

    fn player_at(level: &Level) -> Player {
        let spawn = level
            .start_actors
            .iter()
            .find(|s| s.kind == SpawnKind::Player)
            .unwrap();
        Player::new(0, spawn.cell)
    }

    const FLOOR: &str = "
......
......
..@...
######";

    #[test]
    fn test_player_spawn_offset() {
        let level = level(FLOOR);
        let player = player_at(&level);
        assert_eq!(player.pos, DVec2::new(2.0, 1.5));
        assert_eq!(player.speed, DVec2::ZERO);
    }

    #[test]
    fn test_player_jumps_from_floor() {
        let level = level(FLOOR);
        let player = player_at(&level);

        let up = TickInput {
            up: true,
            ..Default::default()
        };
        let jumped = player.update(0.1, &level, &up);
        // Vertical move blocked by the floor, so the position stays put
        assert_eq!(jumped.pos, player.pos);
        assert_eq!(jumped.speed.y, -JUMP_SPEED);

        // Next step rises
        let rising = jumped.update(0.1, &level, &up);
        assert!(rising.pos.y < jumped.pos.y);
    }

    #[test]
    fn test_player_rests_on_floor_without_up() {
        let level = level(FLOOR);
        let player = player_at(&level);
        let rested = player.update(0.1, &level, &TickInput::default());
        assert_eq!(rested.pos, player.pos);
        assert_eq!(rested.speed, DVec2::ZERO);
    }

    #[test]
    fn test_player_no_jump_while_airborne() {
        let level = level(
            "
.....
..@..
.....
.....
#####",
        );
        let player = player_at(&level);
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        let falling = player.update(0.05, &level, &up);
        assert!(falling.pos.y > player.pos.y);
        assert!((falling.speed.y - 0.05 * GRAVITY).abs() < 1e-12);
    }

    #[test]
    fn test_player_no_jump_when_blocked_moving_up() {
        // Ceiling right above the player's head
        let level = level(
            "
#####
..@..
.....
.....",
        );
        let mut player = player_at(&level);
        player.pos.y = 1.0;
        player.speed.y = -JUMP_SPEED;
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        let bonked = player.update(0.1, &level, &up);
        assert_eq!(bonked.pos, player.pos);
        assert_eq!(bonked.speed.y, 0.0);
    }

    #[test]
    fn test_player_horizontal_input() {
        let level = level(FLOOR);
        let player = player_at(&level);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let moved = player.update(0.1, &level, &right);
        assert!((moved.pos.x - 2.7).abs() < 1e-12);
        assert_eq!(moved.speed.x, PLAYER_X_SPEED);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let moved = player.update(0.1, &level, &left);
        assert!((moved.pos.x - 1.3).abs() < 1e-12);
        assert_eq!(moved.speed.x, -PLAYER_X_SPEED);

        let both = TickInput {
            left: true,
            right: true,
            up: false,
        };
        let moved = player.update(0.1, &level, &both);
        assert_eq!(moved.pos.x, player.pos.x);
        assert_eq!(moved.speed.x, 0.0);
    }

    #[test]
    fn test_player_blocked_by_wall_keeps_x_speed() {
        let level = level(
            "
...#.
..@#.
#####",
        );
        let player = player_at(&level);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let blocked = player.update(0.1, &level, &right);
        assert_eq!(blocked.pos.x, player.pos.x);
        assert_eq!(blocked.speed.x, PLAYER_X_SPEED);
    }

    #[test]
    fn test_lava_spawn_forms() {
        let cell = DVec2::new(3.0, 4.0);
        let lava = Lava::new(1, cell, LavaMotion::Horizontal);
        assert_eq!((lava.speed, lava.reset), (DVec2::new(2.0, 0.0), None));
        let lava = Lava::new(1, cell, LavaMotion::Vertical);
        assert_eq!((lava.speed, lava.reset), (DVec2::new(0.0, 2.0), None));
        let lava = Lava::new(1, cell, LavaMotion::Drip);
        assert_eq!((lava.speed, lava.reset), (DVec2::new(0.0, 3.0), Some(cell)));
        assert_eq!(lava.pos, cell);
    }

    #[test]
    fn test_drip_lava_resets_when_landing() {
        let level = level(
            "
.v.@
....
....
####",
        );
        let spawn = DVec2::new(1.0, 0.0);
        let mut lava = Lava::new(1, spawn, LavaMotion::Drip);

        // Falls freely for six steps
        for _ in 0..6 {
            let next = lava.update(0.1, &level);
            assert!(next.pos.y > lava.pos.y);
            lava = next;
        }
        assert!(lava.pos.y > 1.7 && lava.pos.y < 2.0);

        // Would hit the floor: back to the spawn cell, same speed
        let reset = lava.update(0.1, &level);
        assert_eq!(reset.pos, spawn);
        assert_eq!(reset.speed, lava.speed);
    }

    #[test]
    fn test_bouncing_lava_reverses_in_place() {
        let level = level(
            "
#####
#@.=#
#####",
        );
        let lava = Lava::new(1, DVec2::new(3.0, 1.0), LavaMotion::Horizontal);

        let bounced = lava.update(0.1, &level);
        assert_eq!(bounced.pos, lava.pos);
        assert_eq!(bounced.speed, -lava.speed);

        let moving = bounced.update(0.1, &level);
        assert!((moving.pos.x - 2.8).abs() < 1e-12);
        assert_eq!(moving.pos.y, lava.pos.y);
        assert_eq!(moving.speed, bounced.speed);
    }

    #[test]
    fn test_coin_wobble() {
        let coin = Coin::new(1, DVec2::new(4.0, 2.0), 0.0);
        assert_eq!(coin.base_pos, DVec2::new(4.0, 2.0) + COIN_SPAWN_OFFSET);
        assert_eq!(coin.pos, coin.base_pos);

        let next = coin.update(0.1);
        assert!((next.wobble - 0.8).abs() < 1e-12);
        let expected_y = 2.1 + 0.8f64.sin() * WOBBLE_DIST;
        assert!((next.pos.y - expected_y).abs() < 1e-12);
        assert_eq!(next.pos.x, coin.base_pos.x);
        assert_eq!(next.base_pos, coin.base_pos);
    }

    #[test]
    fn test_coin_wobble_stays_in_band() {
        let mut coin = Coin::new(1, DVec2::ZERO, 1.0);
        for _ in 0..100 {
            coin = coin.update(0.016);
            let offset = coin.pos.y - coin.base_pos.y;
            assert!(offset.abs() <= WOBBLE_DIST + 1e-12);
        }
    }

    #[test]
    fn test_spawn_coin_phase_in_range() {
        use rand::SeedableRng;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let spawn = ActorSpawn {
            kind: SpawnKind::Coin,
            cell: DVec2::new(1.0, 1.0),
        };
        for id in 0..20 {
            let Actor::Coin(coin) = Actor::spawn(id, &spawn, &mut rng) else {
                panic!("expected a coin");
            };
            assert!(coin.wobble >= 0.0 && coin.wobble < std::f64::consts::TAU);
            assert_eq!(coin.id, id);
        }
    }

    #[test]
    fn test_actor_sizes() {
        let player = Actor::Player(Player::new(0, DVec2::ZERO));
        let lava = Actor::Lava(Lava::new(1, DVec2::ZERO, LavaMotion::Drip));
        let coin = Actor::Coin(Coin::new(2, DVec2::ZERO, 0.0));
        assert_eq!(player.size(), DVec2::new(0.8, 1.5));
        assert_eq!(lava.size(), DVec2::new(1.0, 1.0));
        assert_eq!(coin.size(), DVec2::new(0.6, 0.6));
        assert_eq!(coin.kind(), ActorKind::Coin);
        assert_eq!(lava.id(), 1);
    }
}
