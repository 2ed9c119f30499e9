//! `TileInfo.txt` loader.
//!
//! Plain whitespace-separated tokens, in order:
//!
//! ```text
//! <tileset path>
//! <tile count>
//! <x> <y> <w> <h> <has collision 0|1>     (tile count times)
//! <width> <height>
//! <tile index>                            (width * height times, row-major)
//! <player x> <player y>
//! <enemy x> <enemy y>                     (up to three times)
//! ```

use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};

use glam::Vec2;
use log::{info, warn};
use thiserror::Error;

use ocular_core::constants::{MAX_ENEMY_SPAWNS, MAX_MAP_DIMENSION};
use ocular_core::types::Rect;

use crate::grid::{Tile, TileMap};

const TILE_TOKENS: usize = 5;

#[derive(Debug, Error)]
pub enum TileMapError {
    #[error("failed to read tile map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tile map ended while reading {field}")]
    UnexpectedEnd { field: &'static str },
    #[error("invalid {field}: {token:?}")]
    InvalidValue { field: &'static str, token: String },
}

/// Load and parse a tile map file.
pub fn load_tile_info(path: &Path) -> Result<TileMap, TileMapError> {
    let text = std::fs::read_to_string(path).map_err(|source| TileMapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_tile_info(&text)?;
    info!(
        "loaded tile map {} ({}x{}, {} tiles, {} enemy spawns)",
        path.display(),
        map.width(),
        map.height(),
        map.tile_count(),
        map.enemy_spawns.len()
    );
    Ok(map)
}

/// Parse tile map text.
pub fn parse_tile_info(text: &str) -> Result<TileMap, TileMapError> {
    let mut tokens = Tokens::new(text);

    let tileset_path = tokens.word("tileset path")?.to_string();

    let tile_count_token = tokens.peek().unwrap_or_default();
    let tile_count: usize = tokens.parse("tile count")?;
    // Each tile takes five tokens; a count the file cannot hold is malformed.
    if tile_count > tokens.remaining() / TILE_TOKENS {
        return Err(TileMapError::InvalidValue {
            field: "tile count",
            token: tile_count_token.to_string(),
        });
    }
    let mut tiles = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        let source = Rect::new(
            tokens.parse("tile x")?,
            tokens.parse("tile y")?,
            tokens.parse("tile width")?,
            tokens.parse("tile height")?,
        );
        let collision: i32 = tokens.parse("tile collision flag")?;
        tiles.push(Tile {
            source,
            has_collision: collision != 0,
        });
    }

    let declared_width: usize = tokens.parse("map width")?;
    let declared_height: usize = tokens.parse("map height")?;
    if declared_width > MAX_MAP_DIMENSION || declared_height > MAX_MAP_DIMENSION {
        warn!(
            "map is {declared_width}x{declared_height}, clamping to {MAX_MAP_DIMENSION}x{MAX_MAP_DIMENSION}"
        );
    }
    let width = declared_width.min(MAX_MAP_DIMENSION);
    let height = declared_height.min(MAX_MAP_DIMENSION);

    // Every declared cell is consumed so the spawn coordinates stay aligned,
    // but only cells inside the clamped grid are kept.
    let mut cells = Vec::with_capacity(width * height);
    for y in 0..declared_height {
        for x in 0..declared_width {
            let index: i32 = tokens.parse("tile index")?;
            if x < width && y < height {
                cells.push(index);
            }
        }
    }

    let player_spawn = tokens.vec2("player spawn")?;

    let mut enemy_spawns = Vec::new();
    while enemy_spawns.len() < MAX_ENEMY_SPAWNS && !tokens.is_exhausted() {
        enemy_spawns.push(tokens.vec2("enemy spawn")?);
    }

    Ok(TileMap::new(tileset_path, tiles, width, height, cells).with_spawns(player_spawn, enemy_spawns))
}

struct Tokens<'a> {
    inner: std::iter::Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().peekable(),
        }
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.inner.peek().copied()
    }

    fn remaining(&self) -> usize {
        self.inner.clone().count()
    }

    fn is_exhausted(&mut self) -> bool {
        self.inner.peek().is_none()
    }

    fn word(&mut self, field: &'static str) -> Result<&'a str, TileMapError> {
        self.inner
            .next()
            .ok_or(TileMapError::UnexpectedEnd { field })
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, TileMapError> {
        let token = self.word(field)?;
        token.parse().map_err(|_| TileMapError::InvalidValue {
            field,
            token: token.to_string(),
        })
    }

    fn vec2(&mut self, field: &'static str) -> Result<Vec2, TileMapError> {
        Ok(Vec2::new(self.parse(field)?, self.parse(field)?))
    }
}
