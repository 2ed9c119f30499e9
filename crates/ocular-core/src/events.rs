//! Events emitted by the level for audio, persistence and navigation.
//!
//! The level never calls into its host. Everything the host must react to
//! (sounds, checkpoints, scene changes) is queued here and drained once per
//! frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{Archetype, Shooter};

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LevelEvent {
    /// A wave began spawning with the given point budget.
    WaveStarted { wave: u32, budget: u32 },
    /// The wave director placed an enemy.
    EnemySpawned { archetype: Archetype, position: Vec2 },
    /// A projectile struck an enemy.
    EnemyHit { archetype: Archetype, damage: i32 },
    /// An enemy's health reached zero.
    EnemyDefeated { archetype: Archetype, bounty: u32 },
    /// A projectile left its shooter.
    ProjectileFired { shooter: Shooter },
    /// The player lost health.
    PlayerHit { damage: i32, health: i32 },
    /// Every enemy of the wave is down and its budget is spent.
    WaveCleared { wave: u32 },
    /// Progress worth persisting (level entry and every cleared wave).
    Checkpoint { wave: u32, player_health: i32 },
    /// The level asks its host to leave for another scene.
    SceneRequest(SceneRequest),
}

/// Out-of-band navigation request raised by the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SceneRequest {
    GameOver { score: u32 },
    Victory { score: u32 },
}
