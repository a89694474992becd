//! Frame-level application state: the difficulty menu, fixed-step round
//! driving and input journal capture.

use std::path::PathBuf;

use macroquad::prelude::KeyCode;
use rcb_core::{
    Difficulty, Game, InputJournal, InputSnapshot, LevelMap, MapSource, RoundOutcome,
    TICKS_PER_SECOND,
};
use tracing::info;

use crate::outcome_code;

pub const FIXED_STEP_SECONDS: f64 = 1.0 / TICKS_PER_SECOND as f64;
/// Simulation ticks a single slow frame may catch up on; older backlog is dropped.
pub const MAX_STEPS_PER_FRAME: u32 = 5;

const MENU_KEYS: [(KeyCode, Difficulty); 3] = [
    (KeyCode::Key1, Difficulty::Easy),
    (KeyCode::Key2, Difficulty::Medium),
    (KeyCode::Key3, Difficulty::Hard),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Menu,
    Playing,
    Finished(RoundOutcome),
}

/// A round that has ended, handed to the caller for persistence.
#[derive(Debug)]
pub struct FinishedRound {
    pub outcome: RoundOutcome,
    pub journal: InputJournal,
}

pub struct AppState {
    pub mode: AppMode,
    seed: u64,
    map_override: Option<PathBuf>,
    game: Option<Game>,
    map_source: Option<MapSource>,
    journal: Option<InputJournal>,
    accumulator: f64,
    quit_requested: bool,
    finished: Option<FinishedRound>,
}

impl AppState {
    pub fn new(seed: u64, map_override: Option<PathBuf>) -> Self {
        Self {
            mode: AppMode::Menu,
            seed,
            map_override,
            game: None,
            map_source: None,
            journal: None,
            accumulator: 0.0,
            quit_requested: false,
            finished: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Scenario setup for tests; the running journal is not told about edits.
    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    pub fn map_source(&self) -> Option<&MapSource> {
        self.map_source.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn take_finished_round(&mut self) -> Option<FinishedRound> {
        self.finished.take()
    }

    pub fn start_round(&mut self, difficulty: Difficulty) {
        let level = LevelMap::load(difficulty, self.map_override.as_deref());
        let mut game = Game::new(self.seed, difficulty, level.map);
        game.start();
        info!(seed = self.seed, %difficulty, source = ?level.source, "round started");

        self.journal = Some(InputJournal::new(self.seed, difficulty));
        self.game = Some(game);
        self.map_source = Some(level.source);
        self.accumulator = 0.0;
        self.mode = AppMode::Playing;
    }

    /// Handles one rendered frame and returns how many simulation ticks ran.
    ///
    /// `held` is the key state sampled this frame; every tick run during the
    /// frame uses it.
    pub fn frame(
        &mut self,
        keys_pressed: &[KeyCode],
        held: InputSnapshot,
        frame_seconds: f64,
    ) -> u32 {
        match self.mode {
            AppMode::Menu => {
                if keys_pressed.contains(&KeyCode::Escape) {
                    self.quit_requested = true;
                    return 0;
                }
                if let Some(&(_, difficulty)) =
                    MENU_KEYS.iter().find(|(key, _)| keys_pressed.contains(key))
                {
                    self.start_round(difficulty);
                }
                0
            }
            AppMode::Playing => {
                if keys_pressed.contains(&KeyCode::Escape) {
                    self.abort_round();
                    return 0;
                }
                self.accumulator += frame_seconds.max(0.0);
                let mut steps = 0;
                while self.accumulator >= FIXED_STEP_SECONDS && steps < MAX_STEPS_PER_FRAME {
                    self.accumulator -= FIXED_STEP_SECONDS;
                    steps += 1;
                    if self.step(held) {
                        break;
                    }
                }
                if steps == MAX_STEPS_PER_FRAME {
                    self.accumulator = self.accumulator.min(FIXED_STEP_SECONDS);
                }
                steps
            }
            AppMode::Finished(_) => 0,
        }
    }

    /// Runs one tick; true once the round has asked to terminate.
    fn step(&mut self, held: InputSnapshot) -> bool {
        let (Some(game), Some(journal)) = (self.game.as_mut(), self.journal.as_mut()) else {
            return true;
        };
        journal.record(held);
        let report = game.tick(held);
        if !report.terminate_requested {
            return false;
        }
        let outcome = game.outcome().unwrap_or(RoundOutcome::Aborted);
        self.finish(outcome);
        true
    }

    fn abort_round(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        game.abort();
        let outcome = game.outcome().unwrap_or(RoundOutcome::Aborted);
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        info!(outcome = outcome_code(outcome), "round finished");
        if let Some(journal) = self.journal.take() {
            self.finished = Some(FinishedRound { outcome, journal });
        }
        self.mode = AppMode::Finished(outcome);
        self.quit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcb_core::Direction;

    #[test]
    fn menu_key_starts_the_matching_difficulty() {
        let mut app = AppState::new(3, None);
        assert_eq!(app.mode, AppMode::Menu);
        app.frame(&[KeyCode::Key3], InputSnapshot::IDLE, 0.0);

        assert_eq!(app.mode, AppMode::Playing);
        let game = app.game().expect("round should exist");
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(app.map_source(), Some(&MapSource::Embedded("map03.txt")));
    }

    #[test]
    fn escape_in_menu_quits_without_a_round() {
        let mut app = AppState::new(3, None);
        app.frame(&[KeyCode::Escape], InputSnapshot::IDLE, 0.0);
        assert!(app.should_quit());
        assert!(app.game().is_none());
        assert!(app.take_finished_round().is_none());
    }

    #[test]
    fn partial_frames_accumulate_into_ticks() {
        let mut app = AppState::new(3, None);
        app.start_round(Difficulty::Easy);

        assert_eq!(app.frame(&[], InputSnapshot::IDLE, FIXED_STEP_SECONDS * 0.5), 0);
        assert_eq!(app.frame(&[], InputSnapshot::IDLE, FIXED_STEP_SECONDS), 1);
        assert_eq!(app.game().map(Game::current_tick), Some(1));
    }

    #[test]
    fn stalled_frame_catch_up_is_capped() {
        let mut app = AppState::new(3, None);
        app.start_round(Difficulty::Easy);

        assert_eq!(app.frame(&[], InputSnapshot::IDLE, 1.0), MAX_STEPS_PER_FRAME);
        assert!(app.frame(&[], InputSnapshot::IDLE, 0.0) <= 1);
    }

    #[test]
    fn held_keys_are_journaled_per_tick() {
        let mut app = AppState::new(3, None);
        app.start_round(Difficulty::Easy);
        let down = InputSnapshot::only(Direction::Down);
        for _ in 0..4 {
            app.frame(&[], down, FIXED_STEP_SECONDS);
        }
        app.frame(&[KeyCode::Escape], InputSnapshot::IDLE, 0.0);

        let finished = app.take_finished_round().expect("aborted round is handed over");
        assert_eq!(finished.outcome, RoundOutcome::Aborted);
        assert_eq!(finished.journal.total_ticks(), 4);
        assert!(finished.journal.inputs().all(|input| input == down));
    }
}
