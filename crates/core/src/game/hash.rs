//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u8(match self.round {
            RoundState::Idle => 0,
            RoundState::Running => 1,
            RoundState::WonPending => 2,
            RoundState::Won { .. } => 3,
            RoundState::Lost(LossCause::Caught) => 4,
            RoundState::Lost(LossCause::ScoreDepleted) => 5,
            RoundState::Terminated => 6,
        });
        hasher.write_i32(self.state.score);
        hasher.write_u32(self.state.items_collected);
        for actor in self.state.actors.values() {
            hasher.write_i32(actor.body.pos.x);
            hasher.write_i32(actor.body.pos.y);
            hasher.write_i32(actor.body.speed);
        }
        for item in self.state.items.values() {
            hasher.write_u8(item.kind as u8);
            hasher.write_i32(item.cell.col);
            hasher.write_i32(item.cell.row);
        }
        if let Some(cell) = self.state.map.hazard_cell() {
            hasher.write_i32(cell.col);
            hasher.write_i32(cell.row);
        }
        hasher.write_u8(u8::from(self.state.map.hazard_revealed()));
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn hash_tracks_position_changes() {
        let mut a = open_room_game(1);
        let mut b = open_room_game(1);
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());

        a.tick(InputSnapshot::only(Direction::Down));
        b.tick(InputSnapshot::only(Direction::Right));
        assert_ne!(a.snapshot_hash(), b.snapshot_hash());
    }
}
