//! Persistence between play sessions: the save slot and the high-score table.
//!
//! Both are plain-text files owned by explicitly constructed services; the
//! host decides where they live and when they are written.

pub mod leaderboard;
pub mod save;

pub use leaderboard::{HighScoreEntry, HighScoreTable, MAX_HIGH_SCORES};
pub use save::{SaveData, SaveError, SaveSystem};

#[cfg(test)]
mod tests;
