//! Tile map for Ocular.
//!
//! Grid storage, `TileInfo.txt` loading, and the circle-vs-solid-tile query
//! every moving entity validates its tentative position against.

pub use ocular_core as core;

pub mod grid;
pub mod loader;

pub use grid::{Tile, TileMap};
pub use loader::{load_tile_info, parse_tile_info, TileMapError};

#[cfg(test)]
mod tests;
