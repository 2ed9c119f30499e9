//! Systems that operate on the level world each frame.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). They own no state; everything lives in components or in the
//! level's director, camera and score.

pub mod camera;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod render;
pub mod snapshot;
pub mod wave_director;
