//! Core types and definitions for the Ocular arena game.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, input, snapshots, events, constants, and the draw-primitive
//! trait the level renders through. It has no dependency on any window,
//! audio, or rendering backend.

pub mod canvas;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

pub use glam::Vec2;

#[cfg(test)]
mod tests;
