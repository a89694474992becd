//! Offline helpers behind the replay, fuzz and map-check binaries.

use std::path::Path;

use anyhow::{Context, Result};
use rcb_core::content::{HERO_START, item_layout, pursuer_preset};
use rcb_core::map_file::load_map_file;
use rcb_core::{
    Cell, Difficulty, Map, PathFinder, RoundState, TileKind, load_journal_from_file, replay_on_map,
    replay_to_end,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub recorded_ticks: u64,
    pub final_state: String,
    pub final_tick: u64,
    pub final_score: i32,
    pub snapshot_hash_hex: String,
}

/// Loads a saved round journal and re-simulates it, optionally on a map file.
pub fn replay_journal_file(
    journal_path: &Path,
    map_path: Option<&Path>,
    max_ticks: u64,
) -> Result<ReplaySummary> {
    let journal = load_journal_from_file(journal_path)
        .with_context(|| format!("failed to load journal {}", journal_path.display()))?;

    let result = match map_path {
        Some(path) => {
            let map = load_map_file(path)
                .with_context(|| format!("failed to load map {}", path.display()))?;
            replay_on_map(&journal, map, max_ticks)
        }
        None => replay_to_end(&journal, max_ticks),
    }
    .context("replay failed")?;

    Ok(ReplaySummary {
        seed: journal.seed,
        difficulty: journal.difficulty,
        recorded_ticks: journal.total_ticks(),
        final_state: state_label(result.final_state).to_string(),
        final_tick: result.final_tick,
        final_score: result.final_score,
        snapshot_hash_hex: format!("0x{:016x}", result.snapshot_hash),
    })
}

fn state_label(state: RoundState) -> &'static str {
    match state {
        RoundState::Idle => "idle",
        RoundState::Running | RoundState::WonPending => "running",
        RoundState::Won { .. } => "won",
        RoundState::Lost(_) => "lost",
        RoundState::Terminated => "terminated",
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapProblem {
    BlockedCell { what: &'static str, cell: Cell },
    Unreachable { what: &'static str, cell: Cell },
    NoLevelEnd,
}

/// Checks that the pursuer spawn and every item sit on walkable cells connected
/// to the hero start, and that some level-end tile borders that region.
pub fn check_map(map: &Map, difficulty: Difficulty) -> Vec<MapProblem> {
    let start = HERO_START.cell();
    let mut problems = Vec::new();
    if !map.is_traversable(start) {
        problems.push(MapProblem::BlockedCell { what: "hero start", cell: start });
        return problems;
    }

    let mut finder = PathFinder::new();
    let mut reachable = |goal: Cell| goal == start || finder.find_path(map, start, goal).is_some();

    let mut targets = vec![("pursuer spawn", pursuer_preset(difficulty).spawn)];
    targets.extend(item_layout(difficulty).iter().map(|(kind, cell)| (kind.name(), *cell)));
    for (what, cell) in targets {
        if !map.is_traversable(cell) {
            problems.push(MapProblem::BlockedCell { what, cell });
        } else if !reachable(cell) {
            problems.push(MapProblem::Unreachable { what, cell });
        }
    }

    let ends: Vec<Cell> =
        map.cells_column_major().filter(|cell| map.tile_at(*cell) == TileKind::End).collect();
    if ends.is_empty() {
        problems.push(MapProblem::NoLevelEnd);
    } else if !ends.iter().any(|end| {
        NEIGHBOR_OFFSETS.iter().any(|(dc, dr)| {
            let cell = Cell::new(end.col + dc, end.row + dr);
            map.in_bounds(cell) && map.is_traversable(cell) && reachable(cell)
        })
    }) {
        problems.push(MapProblem::Unreachable { what: "level end", cell: ends[0] });
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcb_core::map_file::default_map;
    use rcb_core::{Direction, InputJournal, InputSnapshot, write_journal};
    use tempfile::tempdir;

    #[test]
    fn embedded_maps_pass_the_check() {
        for difficulty in Difficulty::ALL {
            let problems = check_map(&default_map(difficulty), difficulty);
            assert!(problems.is_empty(), "{difficulty}: {problems:?}");
        }
    }

    #[test]
    fn walled_in_start_is_reported() {
        let mut map = default_map(Difficulty::Easy);
        let start = HERO_START.cell();
        for cell in [
            Cell::new(start.col + 1, start.row),
            Cell::new(start.col, start.row + 1),
            Cell::new(start.col - 1, start.row),
            Cell::new(start.col, start.row - 1),
        ] {
            map.set_tile(cell, TileKind::Bricks);
        }
        let problems = check_map(&map, Difficulty::Easy);
        assert!(problems.iter().any(|p| matches!(p, MapProblem::Unreachable { .. })));
    }

    #[test]
    fn map_without_exit_is_reported() {
        let map = Map::new(28, 18);
        assert!(check_map(&map, Difficulty::Easy).contains(&MapProblem::NoLevelEnd));
    }

    #[test]
    fn replays_a_saved_journal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.jsonl");
        let mut journal = InputJournal::new(11, Difficulty::Medium);
        for _ in 0..12 {
            journal.record(InputSnapshot::only(Direction::Down));
        }
        write_journal(&path, &journal).unwrap();

        let summary = replay_journal_file(&path, None, 1_000).unwrap();
        let direct = replay_to_end(&journal, 1_000).unwrap();
        assert_eq!(summary.seed, 11);
        assert_eq!(summary.recorded_ticks, 12);
        assert_eq!(summary.final_tick, direct.final_tick);
        assert_eq!(summary.snapshot_hash_hex, format!("0x{:016x}", direct.snapshot_hash));
    }

    #[test]
    fn missing_journal_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(replay_journal_file(&dir.path().join("absent.jsonl"), None, 10).is_err());
    }
}
