//! Plain-text map layouts: one row per line, space-separated tile ids.
//! This module exists to turn map text into a validated `Map` and to choose
//! between an override file and the embedded per-difficulty default.
//! It does not own hazard placement or any runtime tile state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::content::{default_map_text, map_file_name};
use crate::state::Map;
use crate::types::{Difficulty, MAX_COLS, MAX_ROWS, TileKind};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("expected {expected} map rows, found {found}")]
    WrongRowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} tile ids, found {found}")]
    WrongColumnCount { row: usize, expected: usize, found: usize },
    #[error("row {row}, column {col}: '{raw}' is not a tile id")]
    InvalidTileId { row: usize, col: usize, raw: String },
    #[error("row {row}, column {col}: unknown tile type {id}")]
    UnknownTileType { row: usize, col: usize, id: u8 },
    #[error("failed to read map file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parses map text into row-major tile ids. Blank lines are ignored.
pub fn parse_map(text: &str) -> Result<Vec<u8>, MapError> {
    let mut ids = Vec::with_capacity(MAX_COLS * MAX_ROWS);
    let mut rows = 0;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let row = rows;
        rows += 1;
        if rows > MAX_ROWS {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != MAX_COLS {
            return Err(MapError::WrongColumnCount { row, expected: MAX_COLS, found: fields.len() });
        }
        for (col, raw) in fields.into_iter().enumerate() {
            let id: u8 = raw
                .parse()
                .map_err(|_| MapError::InvalidTileId { row, col, raw: raw.to_string() })?;
            if TileKind::from_id(id).is_none() {
                return Err(MapError::UnknownTileType { row, col, id });
            }
            ids.push(id);
        }
    }

    if rows != MAX_ROWS {
        return Err(MapError::WrongRowCount { expected: MAX_ROWS, found: rows });
    }
    Ok(ids)
}

impl Map {
    /// Builds a full-size level map from row-major tile ids.
    pub fn from_tile_ids(ids: &[u8]) -> Result<Self, MapError> {
        if ids.len() != MAX_COLS * MAX_ROWS {
            return Err(MapError::WrongRowCount { expected: MAX_ROWS, found: ids.len() / MAX_COLS });
        }
        let tiles = ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| {
                TileKind::from_id(id).ok_or(MapError::UnknownTileType {
                    row: idx / MAX_COLS,
                    col: idx % MAX_COLS,
                    id,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Map::from_tiles(MAX_COLS, MAX_ROWS, tiles))
    }
}

pub fn load_map_file(path: &Path) -> Result<Map, MapError> {
    let text = fs::read_to_string(path)
        .map_err(|source| MapError::Io { path: path.to_path_buf(), source })?;
    Map::from_tile_ids(&parse_map(&text)?)
}

/// Embedded map for `difficulty`.
pub fn default_map(difficulty: Difficulty) -> Map {
    match parse_map(default_map_text(difficulty)).and_then(|ids| Map::from_tile_ids(&ids)) {
        Ok(map) => map,
        Err(err) => {
            // Embedded layouts are covered by tests; this is only reachable on a broken build.
            debug_assert!(false, "embedded map for {difficulty} is invalid: {err}");
            Map::new(MAX_COLS, MAX_ROWS)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapSource {
    Embedded(&'static str),
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct LevelMap {
    pub map: Map,
    pub source: MapSource,
}

impl LevelMap {
    /// Loads the override file when given, falling back to the embedded map on any error.
    pub fn load(difficulty: Difficulty, override_path: Option<&Path>) -> Self {
        if let Some(path) = override_path {
            match load_map_file(path) {
                Ok(map) => {
                    info!(path = %path.display(), %difficulty, "loaded map override");
                    return Self { map, source: MapSource::File(path.to_path_buf()) };
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "map override rejected, using embedded {}",
                        map_file_name(difficulty)
                    );
                }
            }
        }
        Self {
            map: default_map(difficulty),
            source: MapSource::Embedded(map_file_name(difficulty)),
        }
    }
}
