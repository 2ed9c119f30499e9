//! Level simulation for Ocular.
//!
//! Owns the hecs world holding the player, enemies and their projectiles,
//! runs the per-frame systems in a fixed order, and produces
//! `LevelSnapshot`s and draw calls for the host. Completely headless.

pub mod components;
pub mod level;
pub mod resources;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use ocular_core as core;
pub use level::{Level, SimConfig};
pub use resources::{AssetLoader, ResourceManager};
pub use systems::wave_director::{WaveConfig, WaveDirector};
