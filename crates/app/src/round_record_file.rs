//! Summary of the most recent round, kept next to the run journals.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rcb_core::{Game, RoundOutcome};
use serde::{Deserialize, Serialize};

use crate::{APP_NAME, format_snapshot_hash, outcome_code};

pub const ROUND_RECORD_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundRecordFile {
    pub format_version: u32,
    pub seed: u64,
    pub difficulty: String,
    pub outcome_code: String,
    pub score: i32,
    pub elapsed_seconds: f64,
    pub tick: u64,
    pub snapshot_hash_hex: String,
    pub journal_path: Option<PathBuf>,
}

impl RoundRecordFile {
    pub fn from_game(game: &Game, outcome: RoundOutcome, journal_path: Option<PathBuf>) -> Self {
        Self {
            format_version: ROUND_RECORD_FORMAT_VERSION,
            seed: game.seed(),
            difficulty: game.difficulty().label().to_string(),
            outcome_code: outcome_code(outcome).to_string(),
            score: game.score(),
            elapsed_seconds: game.elapsed_seconds(),
            tick: game.current_tick(),
            snapshot_hash_hex: format_snapshot_hash(game.snapshot_hash()),
            journal_path,
        }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_round.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcb_core::Difficulty;
    use rcb_core::map_file::default_map;
    use tempfile::tempdir;

    #[test]
    fn record_reflects_the_game() {
        let mut game = Game::new(99, Difficulty::Medium, default_map(Difficulty::Medium));
        game.start();
        game.abort();

        let record = RoundRecordFile::from_game(&game, RoundOutcome::Aborted, None);
        assert_eq!(record.seed, 99);
        assert_eq!(record.difficulty, "Medium");
        assert_eq!(record.outcome_code, "ABORTED");
        assert_eq!(record.score, 20);
        assert_eq!(record.tick, 0);
        assert_eq!(record.snapshot_hash_hex.len(), 18);
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_round.json");

        let record = RoundRecordFile {
            format_version: ROUND_RECORD_FORMAT_VERSION,
            seed: 5,
            difficulty: "Easy".to_string(),
            outcome_code: "LOSS_CAUGHT".to_string(),
            score: 35,
            elapsed_seconds: 12.5,
            tick: 750,
            snapshot_hash_hex: "0x00000000deadbeef".to_string(),
            journal_path: Some(dir.path().join("runs").join("round-easy-5.jsonl")),
        };

        record.write_atomic(&path).unwrap();
        assert!(path.exists());

        let loaded = RoundRecordFile::load(&path).unwrap();
        assert_eq!(record, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }
}
