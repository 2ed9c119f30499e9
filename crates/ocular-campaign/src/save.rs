//! Save slot: the wave to resume at and the player's health, stored as two
//! whitespace-separated integers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ocular_core::constants::PLAYER_MAX_HEALTH;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("save file {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Progress persisted at every checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub wave: u32,
    pub player_health: i32,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            wave: 1,
            player_health: PLAYER_MAX_HEALTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveSystem {
    path: PathBuf,
}

impl SaveSystem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_save(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, data: SaveData) -> Result<(), SaveError> {
        fs::write(&self.path, format!("{} {}\n", data.wave, data.player_health)).map_err(
            |source| SaveError::Io {
                path: self.path.clone(),
                source,
            },
        )?;
        info!(
            "saved wave {} with {} health to {}",
            data.wave,
            data.player_health,
            self.path.display()
        );
        Ok(())
    }

    pub fn load(&self) -> Result<SaveData, SaveError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut fields = text.split_whitespace();
        let wave = self.field(fields.next(), "wave")?;
        let player_health = self.field(fields.next(), "player health")?;
        if wave == 0 {
            return Err(self.malformed("wave must be at least 1".to_string()));
        }
        Ok(SaveData {
            wave,
            player_health,
        })
    }

    /// The saved progress, or a fresh start when there is none or it cannot
    /// be read.
    pub fn load_or_default(&self) -> SaveData {
        if !self.has_save() {
            info!("no save file at {}, starting from wave 1", self.path.display());
            return SaveData::default();
        }
        match self.load() {
            Ok(data) => data,
            Err(err) => {
                warn!("{err}; starting from wave 1");
                SaveData::default()
            }
        }
    }

    /// Remove the save file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Err(source) if source.kind() != io::ErrorKind::NotFound => Err(SaveError::Io {
                path: self.path.clone(),
                source,
            }),
            _ => Ok(()),
        }
    }

    fn field<T: std::str::FromStr>(&self, token: Option<&str>, name: &str) -> Result<T, SaveError> {
        let token = token.ok_or_else(|| self.malformed(format!("missing {name}")))?;
        token
            .parse()
            .map_err(|_| self.malformed(format!("{name} {token:?} is not a number")))
    }

    fn malformed(&self, reason: String) -> SaveError {
        SaveError::Malformed {
            path: self.path.clone(),
            reason,
        }
    }
}
