//! Ocular headless host.
//!
//! Wires the level simulation, the persistence services and a typed scene
//! registry together and drives them from a fixed-rate game loop thread.

pub mod game_loop;
pub mod headless;
pub mod logging;
pub mod scenes;
pub mod state;

pub use ocular_core as core;
