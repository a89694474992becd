//! File-backed JSONL input journal with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `seed`, `difficulty`.
//! - Lines 2+: one record per run-length input frame, each carrying a
//!   SHA-256 hash chain (`prev_sha256_hex`, `sha256_hex`) for corruption detection.
//!
//! Writing flushes each record immediately so a crashed session keeps every
//! completed frame. Loading validates every line's JSON shape and the chain,
//! stopping at the first invalid or incomplete line.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::journal::{InputFrame, InputJournal};
use crate::types::Difficulty;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    seed: u64,
    difficulty: Difficulty,
}

/// Fields hashed for a record, concatenated with `prev_sha256_hex`.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    frame: &'a InputFrame,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    frame: InputFrame,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash used for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates the file (and parent directories) and writes the header line.
    pub fn create(path: &Path, journal: &InputJournal) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let header = FileHeader {
            format_version: journal.format_version,
            seed: journal.seed,
            difficulty: journal.difficulty,
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;
        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    pub fn append(&mut self, frame: &InputFrame) -> io::Result<()> {
        let body = RecordBody { seq: self.next_seq, frame };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq: self.next_seq,
            frame: *frame,
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(())
    }
}

/// Writes a complete journal, replacing any existing file at `path`.
pub fn write_journal(path: &Path, journal: &InputJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, journal)?;
    for frame in &journal.frames {
        writer.append(frame)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

pub fn load_journal_from_file(path: &Path) -> Result<InputJournal, JournalError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = InputJournal {
        format_version: header.format_version,
        seed: header.seed,
        difficulty: header.difficulty,
        frames: Vec::new(),
    };

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_seq: u64 = 0;

    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2;
        let invalid = |message: String| JournalError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: FileRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != next_seq {
            return Err(invalid(format!("expected seq {next_seq}, found {}", record.seq)));
        }
        if record.frame.ticks == 0 {
            return Err(invalid("frame covers zero ticks".to_string()));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalError::HashChainBroken { line: line_number });
        }

        let body = RecordBody { seq: record.seq, frame: &record.frame };
        let body_json = serde_json::to_string(&body).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != compute_record_sha256(&body_json, &prev_sha256_hex) {
            return Err(JournalError::HashChainBroken { line: line_number });
        }

        journal.frames.push(record.frame);
        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(journal)
}

#[cfg(test)]
mod tests;
