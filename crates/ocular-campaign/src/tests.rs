use std::fs;

use tempfile::tempdir;

use crate::leaderboard::{HighScoreTable, MAX_HIGH_SCORES};
use crate::save::{SaveData, SaveError, SaveSystem};

// ---- Save slot ----

#[test]
fn test_save_round_trip() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path().join("round_trip.txt"));
    assert!(!saves.has_save());

    let data = SaveData {
        wave: 4,
        player_health: 30,
    };
    saves.save(data).unwrap();
    assert!(saves.has_save());
    assert_eq!(saves.load().unwrap(), data);
    assert_eq!(fs::read_to_string(saves.path()).unwrap().trim(), "4 30");
}

#[test]
fn test_missing_save_is_fresh_start() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path().join("missing.txt"));
    assert!(matches!(saves.load(), Err(SaveError::Io { .. })));
    assert_eq!(saves.load_or_default(), SaveData::default());
    assert_eq!(SaveData::default().wave, 1);
    assert_eq!(SaveData::default().player_health, 70);
}

#[test]
fn test_malformed_save_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("malformed.txt");
    let saves = SaveSystem::new(&path);

    fs::write(&path, "7").unwrap();
    assert!(matches!(saves.load(), Err(SaveError::Malformed { .. })));

    fs::write(&path, "seven 70").unwrap();
    assert!(matches!(saves.load(), Err(SaveError::Malformed { .. })));

    fs::write(&path, "0 70").unwrap();
    assert!(matches!(saves.load(), Err(SaveError::Malformed { .. })));
    assert_eq!(saves.load_or_default(), SaveData::default());
}

#[test]
fn test_clear_removes_save() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path().join("clear.txt"));
    saves.save(SaveData::default()).unwrap();
    saves.clear().unwrap();
    assert!(!saves.has_save());
    saves.clear().unwrap();
}

// ---- Leaderboard ----

#[test]
fn test_table_sorted_and_truncated() {
    let dir = tempdir().unwrap();
    let mut table = HighScoreTable::load(dir.path().join("sorted.txt"));
    for (name, score) in [("ana", 40), ("bo", 90), ("cy", 10), ("di", 70), ("ed", 50), ("fa", 60)] {
        table.add(name, score).unwrap();
    }

    let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![90, 70, 60, 50, 40]);
    assert_eq!(table.entries().len(), MAX_HIGH_SCORES);
    assert_eq!(table.highest(), 90);
}

#[test]
fn test_is_high_score() {
    let dir = tempdir().unwrap();
    let mut table = HighScoreTable::load(dir.path().join("is_high.txt"));
    assert!(table.is_high_score(0));
    for score in [10, 20, 30, 40, 50] {
        table.add("p", score).unwrap();
    }
    assert!(!table.is_high_score(10));
    assert!(table.is_high_score(11));
}

#[test]
fn test_table_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("persist.txt");
    let mut table = HighScoreTable::load(&path);
    table.add("first player", 120).unwrap();
    table.add("", 80).unwrap();

    let reloaded = HighScoreTable::load(&path);
    assert_eq!(reloaded.entries(), table.entries());
    assert_eq!(reloaded.entries()[0].name, "first_player");
    assert_eq!(reloaded.entries()[1].name, "???");
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("skip.txt");
    fs::write(&path, "ana 30\nbroken\nbo x\n\ncy 50\n").unwrap();
    let table = HighScoreTable::load(&path);
    let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["cy", "ana"]);
}

#[test]
fn test_empty_table_highest_is_zero() {
    let dir = tempdir().unwrap();
    let table = HighScoreTable::load(dir.path().join("empty.txt"));
    assert_eq!(table.highest(), 0);
    assert!(table.entries().is_empty());
}
