//! Round lifecycle: start, level-end resolution, loss, win countdown and abort.
//! This module exists so every state transition and termination request goes
//! through one place. It does not own per-tick movement or item effects.

use tracing::info;

use super::*;
use crate::content::{INCOMPLETE_REWARDS_MESSAGE, WIN_DELAY_TICKS};

impl Game {
    pub fn start(&mut self) {
        if self.round != RoundState::Idle {
            return;
        }
        self.round = RoundState::Running;
        self.announce(LogEvent::RoundStarted { difficulty: self.difficulty });
    }

    /// Tears the round down from any state. A pending win countdown never fires.
    pub fn abort(&mut self) {
        if self.round == RoundState::Terminated {
            return;
        }
        if matches!(self.round, RoundState::Won { .. }) {
            info!(tick = self.tick, "win countdown cancelled");
        }
        self.round = RoundState::Terminated;
        self.terminate_pending = false;
        if self.outcome.is_none() {
            self.outcome = Some(RoundOutcome::Aborted);
            self.finished_at_tick = Some(self.tick);
        }
        self.announce(LogEvent::RoundAborted { tick: self.tick });
    }

    /// The hero touched a level-end tile. A rejection is logged once per contact.
    pub(super) fn resolve_level_end(&mut self) {
        let rewards_left = self.state.rewards_left();
        if rewards_left > 0 {
            self.state.messages.show_message(INCOMPLETE_REWARDS_MESSAGE);
            self.round = RoundState::WonPending;
            if !self.completion_rejected {
                self.completion_rejected = true;
                self.announce(LogEvent::CompletionRejected { rewards_left });
            }
            return;
        }
        self.round = RoundState::Won { terminate_at_tick: self.tick + WIN_DELAY_TICKS };
        self.outcome = Some(RoundOutcome::Won);
        self.finished_at_tick = Some(self.tick);
        self.announce(LogEvent::RoundWon { tick: self.tick });
    }

    pub(super) fn lose(&mut self, cause: LossCause) {
        if !self.round.is_active() {
            return;
        }
        self.state.hero_alive = false;
        self.round = RoundState::Lost(cause);
        self.outcome = Some(RoundOutcome::Lost(cause));
        self.finished_at_tick = Some(self.tick);
        self.announce(LogEvent::RoundLost { cause, tick: self.tick });
        self.request_termination();
    }

    pub(super) fn advance_win_countdown(&mut self) {
        if let RoundState::Won { terminate_at_tick } = self.round
            && self.tick >= terminate_at_tick
        {
            self.round = RoundState::Terminated;
            self.request_termination();
        }
    }

    fn request_termination(&mut self) {
        self.termination_requests += 1;
        self.terminate_pending = true;
    }
}
