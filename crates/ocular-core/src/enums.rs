//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Slow melee blob, cheapest to field.
    Slime,
    /// Patrols between two waypoints and fires at the player.
    Bee,
    /// Periodically phases out and cannot be damaged.
    Ghost,
    /// Plain melee enemy with no special behavior.
    Generic,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Slime,
        Archetype::Bee,
        Archetype::Ghost,
        Archetype::Generic,
    ];
}

/// Behavior state of an enemy, without its transient data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    #[default]
    Wandering,
    Chasing,
    Ready,
    Attacking,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Bee,
}

/// Sprite-sheet row for four-way facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Left,
    #[default]
    Down,
    Right,
}

impl Facing {
    /// Dominant axis of `heading` picks the row; zero keeps `Down`.
    pub fn from_heading(heading: glam::Vec2) -> Self {
        if heading.x.abs() > heading.y.abs() {
            if heading.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            }
        } else if heading.y < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }

    pub fn row(self) -> u32 {
        match self {
            Facing::Up => 0,
            Facing::Left => 1,
            Facing::Down => 2,
            Facing::Right => 3,
        }
    }
}

/// Lifecycle phase of a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Not begun, or torn down.
    #[default]
    Idle,
    Playing,
    /// Player health reached zero.
    Defeat,
    /// Final wave cleared.
    Victory,
}
