//! Player input sent from the host to the level.
//!
//! Input is queued and applied at the next frame boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Controller state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Desired movement direction. Each axis is in -1..=1; it need not be
    /// normalized.
    pub movement: Vec2,
    /// Fire a projectile in the current facing direction.
    pub fire: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            fire: false,
        }
    }

    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }
}
