//! Running levels
//!
//! A `LevelRun` plays one attempt at a level until it is won or lost and the
//! grace period has passed. A `GameRunner` plays the levels in order,
//! restarting a level after a loss and moving on after a win.

use std::sync::Arc;

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameState, Level, LevelFormatError, Outcome, TickInput};

/// One frame's worth of simulation input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    /// Elapsed time (seconds), already clamped by the driver
    pub dt: f64,
    pub input: TickInput,
}

/// Shows game states; implemented by the presentation layer
pub trait Presenter {
    /// Show the state produced by the latest frame
    fn sync_state(&mut self, state: &GameState);

    /// The attempt is over; tear down whatever shows it
    fn clear(&mut self) {}
}

/// A presenter that shows nothing
impl Presenter for () {
    fn sync_state(&mut self, _state: &GameState) {}
}

/// Turns frame timestamps into step times
///
/// Long pauses (a hidden tab, a debugger) are clamped so a single step never
/// covers more than `max_frame_secs`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time_ms: Option<f64>,
    max_frame_secs: f64,
}

impl FrameClock {
    pub fn new(max_frame_secs: f64) -> Self {
        Self {
            last_time_ms: None,
            max_frame_secs,
        }
    }

    /// Feed a timestamp (milliseconds); returns the step time in seconds
    ///
    /// The first timestamp only starts the clock.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        let step = self
            .last_time_ms
            .map(|last| (now_ms - last).min(self.max_frame_secs * 1000.0) / 1000.0);
        self.last_time_ms = Some(now_ms);
        step
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::consts::MAX_FRAME_SECS)
    }
}

/// A single attempt at a level
#[derive(Debug, Clone)]
pub struct LevelRun {
    state: GameState,
    /// Grace time left once the attempt is decided
    ending: f64,
}

impl LevelRun {
    pub fn new(level: Arc<Level>, seed: u64, end_grace_secs: f64) -> Self {
        Self {
            state: GameState::start(level, seed),
            ending: end_grace_secs,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance one frame
    ///
    /// Returns the outcome once the attempt is decided and its grace period
    /// has run out. The state keeps animating during the grace period.
    pub fn frame(&mut self, dt: f64, input: &TickInput) -> Option<Outcome> {
        let before = self.state.status;
        self.state = self.state.update(dt, input);
        if self.state.status != before {
            log::debug!("Level {}", self.state.status.as_str());
        }

        match self.state.status.outcome() {
            None => None,
            Some(_) if self.ending > 0.0 => {
                self.ending -= dt;
                None
            }
            Some(outcome) => Some(outcome),
        }
    }
}

/// Play one attempt, pulling frames until it finishes
///
/// Every frame's state goes to the presenter, which is cleared once the
/// attempt ends. Returns `None` if the frames run out first.
pub fn run_level<I, P>(mut run: LevelRun, frames: &mut I, presenter: &mut P) -> Option<(Outcome, u64)>
where
    I: Iterator<Item = Frame>,
    P: Presenter + ?Sized,
{
    let mut frame_count = 0;
    for frame in frames {
        frame_count += 1;
        let outcome = run.frame(frame.dt, &frame.input);
        presenter.sync_state(run.state());
        if let Some(outcome) = outcome {
            presenter.clear();
            return Some((outcome, frame_count));
        }
    }
    None
}

/// What the sequencer does after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Lost: play the same level again
    Restart,
    /// Won: on to the next level
    Advance,
    /// Won the last level
    Finished,
}

/// Totals for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub levels_completed: usize,
    pub attempts: u32,
    pub frames: u64,
}

/// Errors while running the level sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("ran out of frames on level {level} after {attempts} attempts")]
    FramesExhausted { level: usize, attempts: u32 },
}

/// Plays levels in order
#[derive(Debug, Clone)]
pub struct GameRunner {
    levels: Vec<Arc<Level>>,
    index: usize,
    attempts: u32,
    settings: Settings,
}

impl GameRunner {
    pub fn new(levels: Vec<Arc<Level>>, settings: Settings) -> Self {
        Self {
            levels,
            index: 0,
            attempts: 0,
            settings,
        }
    }

    /// Build a runner from level plans, rejecting the first invalid one
    pub fn from_plans<S: AsRef<str>>(
        plans: &[S],
        settings: Settings,
    ) -> Result<Self, LevelFormatError> {
        let levels = plans
            .iter()
            .map(|plan| Level::parse(plan.as_ref()).map(Arc::new))
            .collect::<Result<_, _>>()?;
        Ok(Self::new(levels, settings))
    }

    /// Index of the level being played
    pub fn level_index(&self) -> usize {
        self.index
    }

    /// Attempts started so far, across all levels
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.levels.len()
    }

    pub fn current_level(&self) -> Option<&Arc<Level>> {
        self.levels.get(self.index)
    }

    /// Start a fresh attempt at the current level
    ///
    /// The level itself is shared between attempts; only the game state is
    /// new.
    pub fn start_attempt(&mut self) -> Option<LevelRun> {
        let level = self.current_level()?.clone();
        let seed = self.settings.seed.wrapping_add(u64::from(self.attempts));
        self.attempts += 1;
        log::info!(
            "Starting level {} of {} (attempt {})",
            self.index + 1,
            self.levels.len(),
            self.attempts
        );
        Some(LevelRun::new(level, seed, self.settings.end_grace_secs))
    }

    /// Record the outcome of the current attempt
    pub fn record(&mut self, outcome: Outcome) -> Progress {
        match outcome {
            Outcome::Lost => {
                log::info!("Level {} lost, restarting", self.index + 1);
                Progress::Restart
            }
            Outcome::Won => {
                log::info!("Level {} won", self.index + 1);
                self.index += 1;
                if self.is_finished() {
                    Progress::Finished
                } else {
                    Progress::Advance
                }
            }
        }
    }

    /// Play the remaining levels to the end
    pub fn run<I, P>(&mut self, frames: I, presenter: &mut P) -> Result<GameSummary, RunError>
    where
        I: IntoIterator<Item = Frame>,
        P: Presenter + ?Sized,
    {
        let mut frames = frames.into_iter();
        let start_index = self.index;
        let start_attempts = self.attempts;
        let mut frame_total = 0;

        while let Some(run) = self.start_attempt() {
            let Some((outcome, frame_count)) = run_level(run, &mut frames, presenter) else {
                log::warn!("Out of frames on level {}", self.index + 1);
                return Err(RunError::FramesExhausted {
                    level: self.index,
                    attempts: self.attempts,
                });
            };
            frame_total += frame_count;
            if self.record(outcome) == Progress::Finished {
                log::info!("You've won!");
            }
        }

        Ok(GameSummary {
            levels_completed: self.index - start_index,
            attempts: self.attempts - start_attempts,
            frames: frame_total,
        })
    }
}
