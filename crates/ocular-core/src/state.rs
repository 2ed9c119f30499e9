//! Level snapshot: the complete visible state after a frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::LevelEvent;
use crate::types::{Rect, SimTime};

/// Everything a renderer or debugger needs to show the level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub time: SimTime,
    pub phase: LevelPhase,
    pub wave: WaveView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub camera: CameraView,
    pub score: ScoreView,
    pub events: Vec<LevelEvent>,
}

/// Wave director status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub budget: u32,
    pub remaining_points: u32,
    pub active: bool,
    /// Seconds until the next wave (only meaningful while inactive).
    pub cooldown_secs: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub facing: Facing,
    /// True while the post-hit grace period runs.
    pub recovering: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub archetype: Archetype,
    pub phase: EnemyPhase,
    pub position: Vec2,
    pub radius: f32,
    pub rotation_degrees: f32,
    pub facing: Facing,
    pub health: i32,
    pub max_health: i32,
    pub detection_radius: f32,
    pub aggro_radius: f32,
    pub ready_attack_radius: f32,
    /// False while flashing after a hit or while a ghost is phased out.
    pub visible: bool,
    /// False while the enemy ignores damage.
    pub vulnerable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub shooter: Shooter,
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    pub window: Rect,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub points: u32,
    pub enemies_defeated: u32,
    pub projectiles_fired: u32,
}
