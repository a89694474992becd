use std::iter;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, InputSnapshot};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Per-tick key state for a whole round, run-length encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub frames: Vec<InputFrame>,
}

/// `ticks` consecutive ticks with the same held keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub ticks: u32,
    pub input: InputSnapshot,
}

impl InputJournal {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, difficulty, frames: Vec::new() }
    }

    /// Appends one tick of input, extending the last frame when the keys are unchanged.
    pub fn record(&mut self, input: InputSnapshot) {
        if let Some(last) = self.frames.last_mut()
            && last.input == input
            && last.ticks < u32::MAX
        {
            last.ticks += 1;
            return;
        }
        self.frames.push(InputFrame { ticks: 1, input });
    }

    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|frame| u64::from(frame.ticks)).sum()
    }

    /// Expands the frames back into one snapshot per tick.
    pub fn inputs(&self) -> impl Iterator<Item = InputSnapshot> + '_ {
        self.frames
            .iter()
            .flat_map(|frame| iter::repeat_n(frame.input, frame.ticks as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn repeated_input_extends_the_last_frame() {
        let mut journal = InputJournal::new(5, Difficulty::Hard);
        let down = InputSnapshot::only(Direction::Down);
        for _ in 0..4 {
            journal.record(down);
        }
        journal.record(InputSnapshot::IDLE);
        journal.record(down);

        assert_eq!(
            journal.frames,
            vec![
                InputFrame { ticks: 4, input: down },
                InputFrame { ticks: 1, input: InputSnapshot::IDLE },
                InputFrame { ticks: 1, input: down },
            ]
        );
        assert_eq!(journal.total_ticks(), 6);
        assert_eq!(journal.inputs().filter(|i| *i == down).count(), 5);
    }
}
