//! Where finished rounds' input journals are stored on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rcb_core::{InputJournal, write_journal};
use tracing::info;

use crate::APP_NAME;

pub fn default_runs_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| proj_dirs.data_dir().join("runs"))
}

pub fn journal_file_name(journal: &InputJournal) -> String {
    format!("round-{}-{}.jsonl", journal.difficulty.label().to_lowercase(), journal.seed)
}

/// Writes `journal` into `dir`, replacing an earlier round with the same seed and difficulty.
pub fn save_round_journal(dir: &Path, journal: &InputJournal) -> Result<PathBuf> {
    let path = dir.join(journal_file_name(journal));
    write_journal(&path, journal)
        .with_context(|| format!("failed to write round journal {}", path.display()))?;
    info!(path = %path.display(), ticks = journal.total_ticks(), "round journal saved");
    Ok(path)
}
