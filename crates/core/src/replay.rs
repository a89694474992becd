use thiserror::Error;

use crate::game::Game;
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};
use crate::map_file::default_map;
use crate::state::Map;
use crate::types::{InputSnapshot, RoundState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("journal format {found} is not supported (expected {JOURNAL_FORMAT_VERSION})")]
    UnsupportedFormat { found: u16 },
    #[error("round ended at tick {tick} with {remaining} recorded ticks left over")]
    InputAfterRoundEnd { tick: u64, remaining: u64 },
    #[error("replay exceeded the {max_ticks}-tick budget")]
    TickBudgetExceeded { max_ticks: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_state: RoundState,
    pub final_tick: u64,
    pub final_score: i32,
    pub snapshot_hash: u64,
}

/// Re-simulates `journal` on the embedded map for its difficulty.
pub fn replay_to_end(journal: &InputJournal, max_ticks: u64) -> Result<ReplayResult, ReplayError> {
    replay_on_map(journal, default_map(journal.difficulty), max_ticks)
}

/// Re-simulates `journal` on `map`, then lets a pending win countdown run out.
pub fn replay_on_map(
    journal: &InputJournal,
    map: Map,
    max_ticks: u64,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }

    let mut game = Game::new(journal.seed, journal.difficulty, map);
    game.start();

    let total = journal.total_ticks();
    for (consumed, input) in journal.inputs().enumerate() {
        if is_finished(game.round_state()) {
            return Err(ReplayError::InputAfterRoundEnd {
                tick: game.current_tick(),
                remaining: total - consumed as u64,
            });
        }
        if game.current_tick() >= max_ticks {
            return Err(ReplayError::TickBudgetExceeded { max_ticks });
        }
        game.tick(input);
    }

    while matches!(game.round_state(), RoundState::Won { .. }) {
        if game.current_tick() >= max_ticks {
            return Err(ReplayError::TickBudgetExceeded { max_ticks });
        }
        game.tick(InputSnapshot::IDLE);
    }

    Ok(ReplayResult {
        final_state: game.round_state(),
        final_tick: game.current_tick(),
        final_score: game.score(),
        snapshot_hash: game.snapshot_hash(),
    })
}

fn is_finished(state: RoundState) -> bool {
    matches!(state, RoundState::Lost(_) | RoundState::Terminated)
}
