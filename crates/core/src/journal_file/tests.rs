use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::types::{Direction, InputSnapshot};

fn make_test_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn frame(ticks: u32, direction: Option<Direction>) -> InputFrame {
    InputFrame { ticks, input: direction.map_or(InputSnapshot::IDLE, InputSnapshot::only) }
}

fn sample_journal() -> InputJournal {
    let mut journal = InputJournal::new(42, Difficulty::Medium);
    journal.frames.push(frame(4, Some(Direction::Down)));
    journal.frames.push(frame(7, None));
    journal.frames.push(frame(2, Some(Direction::Left)));
    journal
}

#[test]
fn header_and_frames_roundtrip() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "roundtrip.jsonl");
    let journal = sample_journal();

    write_journal(&path, &journal).unwrap();
    let loaded = load_journal_from_file(&path).unwrap();

    assert_eq!(loaded, journal);
}

#[test]
fn hash_chain_detects_tampered_record() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "tampered.jsonl");
    write_journal(&path, &sample_journal()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    assert_eq!(lines.len(), 4, "expected header + 3 records");
    lines[2] = lines[2].replace("\"ticks\":7", "\"ticks\":9");
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalError::HashChainBroken { line: 3 })),
        "expected hash chain broken at line 3, got: {result:?}"
    );
}

#[test]
fn hash_chain_detects_deleted_record() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "deleted.jsonl");
    write_journal(&path, &sample_journal()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    fs::write(&path, format!("{}\n{}\n{}\n", lines[0], lines[1], lines[3])).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(
            result,
            Err(JournalError::HashChainBroken { .. }) | Err(JournalError::InvalidRecord { .. })
        ),
        "expected chain corruption error, got: {result:?}"
    );
}

#[test]
fn truncated_last_line_returns_error() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "truncated.jsonl");
    let journal = sample_journal();
    let mut writer = JournalWriter::create(&path, &journal).unwrap();
    writer.append(&journal.frames[0]).unwrap();

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    write!(file, "{{\"seq\":1,\"fra").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalError::IncompleteLine { line: 3 })),
        "expected incomplete line at line 3, got: {result:?}"
    );
}

#[test]
fn zero_tick_frame_is_rejected() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "zero.jsonl");
    let journal = sample_journal();
    let mut writer = JournalWriter::create(&path, &journal).unwrap();
    writer.append(&frame(0, None)).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalError::InvalidRecord { line: 2, .. })),
        "expected invalid record at line 2, got: {result:?}"
    );
}

#[test]
fn empty_file_returns_error() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "empty.jsonl");
    fs::write(&path, "").unwrap();

    let result = load_journal_from_file(&path);
    assert!(matches!(result, Err(JournalError::EmptyFile)), "got: {result:?}");
}

#[test]
fn header_only_file_loads_empty_journal() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "header_only.jsonl");
    let _writer = JournalWriter::create(&path, &InputJournal::new(555, Difficulty::Easy)).unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.seed, 555);
    assert_eq!(loaded.difficulty, Difficulty::Easy);
    assert!(loaded.frames.is_empty());
}

#[test]
fn invalid_header_returns_error() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "bad_header.jsonl");
    fs::write(&path, "not valid json\n").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalError::InvalidHeader { line: 1, .. })),
        "expected invalid header error, got: {result:?}"
    );
}
