//! Tile Platformer entry point
//!
//! Runs the level sequence headless with a scripted player.
//!
//! Usage: `tile-platformer [settings.json] [levels.json]`

use tile_platformer::levels::{LevelPack, game_levels};
use tile_platformer::runner::{Frame, GameRunner, Presenter};
use tile_platformer::settings::Settings;
use tile_platformer::sim::{GameState, GameStatus, TickInput};

/// Simulation rate of the headless driver
const FRAME_RATE: f64 = 60.0;

/// Logs status changes instead of drawing anything
#[derive(Default)]
struct LogPresenter {
    last_status: Option<GameStatus>,
    frames: u64,
}

impl Presenter for LogPresenter {
    fn sync_state(&mut self, state: &GameState) {
        self.frames += 1;
        if self.last_status != Some(state.status) {
            let player = state.player();
            log::info!(
                "Frame {}: {} at ({:.2}, {:.2}), {} coins left",
                self.frames,
                state.status.as_str(),
                player.pos.x,
                player.pos.y,
                state.coins_left()
            );
            self.last_status = Some(state.status);
        }
        log::trace!("{}", serde_json::to_string(&state.actors).unwrap_or_default());
    }

    fn clear(&mut self) {
        self.last_status = None;
    }
}

/// Run right, jumping now and then
fn scripted_input(frame: u64) -> TickInput {
    TickInput {
        left: false,
        right: true,
        up: frame % 90 < 20,
    }
}

fn main() {
    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args.next().map(Settings::load).unwrap_or_default();

    let levels = match args.next() {
        Some(path) => match LevelPack::load(&path).and_then(|pack| pack.parse()) {
            Ok(levels) => {
                log::info!("Loaded {} levels from {}", levels.len(), path);
                levels
            }
            Err(e) => {
                log::error!("Could not load level pack {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => game_levels(),
    };

    let dt = (1.0 / FRAME_RATE).min(settings.max_frame_secs);
    let frames = (0..settings.frame_budget).map(|i| Frame {
        dt,
        input: scripted_input(i),
    });

    let mut runner = GameRunner::new(levels, settings);
    let mut presenter = LogPresenter::default();
    match runner.run(frames, &mut presenter) {
        Ok(summary) => log::info!(
            "Finished {} levels in {} attempts ({} frames)",
            summary.levels_completed,
            summary.attempts,
            summary.frames
        ),
        Err(e) => log::warn!(
            "Stopped on level {} of {}: {}",
            runner.level_index() + 1,
            runner.level_count(),
            e
        ),
    }
}
