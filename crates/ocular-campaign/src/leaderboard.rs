//! High-score table: the best `MAX_HIGH_SCORES` runs, one `name score` line
//! each, best first.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::save::SaveError;

pub const MAX_HIGH_SCORES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighScoreEntry {
    /// Names are stored as a single token; whitespace becomes `_` and an
    /// empty name becomes `???`.
    pub fn new(name: &str, score: u32) -> Self {
        let name: String = name
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Self {
            name: if name.is_empty() { "???".to_string() } else { name },
            score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighScoreTable {
    path: PathBuf,
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    /// Open the table stored at `path`. A missing or unreadable file yields
    /// an empty table; malformed lines are skipped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse_entries(&text),
            Err(err) => {
                info!("no high scores at {} ({err}), starting empty", path.display());
                Vec::new()
            }
        };
        let mut table = Self { path, entries };
        table.normalize();
        table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Whether `score` would earn a place in the table.
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= MAX_HIGH_SCORES => score > lowest.score,
            _ => true,
        }
    }

    pub fn highest(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Insert a run and write the table back to disk.
    pub fn add(&mut self, name: &str, score: u32) -> Result<(), SaveError> {
        self.entries.push(HighScoreEntry::new(name, score));
        self.normalize();
        self.save()
    }

    pub fn save(&self) -> Result<(), SaveError> {
        let text: String = self
            .entries
            .iter()
            .map(|e| format!("{} {}\n", e.name, e.score))
            .collect();
        fs::write(&self.path, text).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Best first; among equal scores the earlier entry stays ahead.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

fn parse_entries(text: &str) -> Vec<HighScoreEntry> {
    let mut entries = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next().map(str::parse::<u32>)) {
            (Some(name), Some(Ok(score))) => entries.push(HighScoreEntry::new(name, score)),
            _ => warn!("skipping malformed high score line {line:?}"),
        }
    }
    entries
}
