//! TileMap: loaded cell grid with collision queries.

use glam::Vec2;

use ocular_core::canvas::{draw_texture_checked, Canvas, Color, TextureHandle};
use ocular_core::constants::{MAX_MAP_DIMENSION, TILE_SIZE};
use ocular_core::types::{Body, Rect};

/// One entry of the tile atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Source rectangle inside the tileset texture.
    pub source: Rect,
    /// Whether entities are blocked by cells using this tile.
    pub has_collision: bool,
}

/// Immutable tile grid plus the spawn coordinates named by the map file.
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    /// Tileset texture path, resolved through the resource layer.
    pub tileset_path: String,
    tiles: Vec<Tile>,
    /// Tile indices, row-major (row 0 = top).
    cells: Vec<i32>,
    width: usize,
    height: usize,
    pub player_spawn: Vec2,
    pub enemy_spawns: Vec<Vec2>,
}

impl TileMap {
    /// Build a map from a cell buffer. Dimensions are clamped to
    /// `MAX_MAP_DIMENSION`; a buffer shorter than `width * height` is padded
    /// with empty cells.
    pub fn new(
        tileset_path: impl Into<String>,
        tiles: Vec<Tile>,
        width: usize,
        height: usize,
        mut cells: Vec<i32>,
    ) -> Self {
        let width = width.min(MAX_MAP_DIMENSION);
        let height = height.min(MAX_MAP_DIMENSION);
        cells.resize(width * height, -1);
        Self {
            tileset_path: tileset_path.into(),
            tiles,
            cells,
            width,
            height,
            player_spawn: Vec2::ZERO,
            enemy_spawns: Vec::new(),
        }
    }

    /// A map with no cells. Used as the placeholder when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from literal rows; handy for fixtures.
    pub fn from_rows(tiles: Vec<Tile>, rows: &[&[i32]]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut cells = vec![-1; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                cells[y * width + x] = index;
            }
        }
        Self::new(String::new(), tiles, width, height, cells)
    }

    pub fn with_spawns(mut self, player: Vec2, enemies: Vec<Vec2>) -> Self {
        self.player_spawn = player;
        self.enemy_spawns = enemies;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Map extent in world pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// World rectangle covered by cell (x, y).
    pub fn cell_rect(x: usize, y: usize) -> Rect {
        Rect::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, TILE_SIZE, TILE_SIZE)
    }

    /// Tile at cell (x, y). Out-of-grid cells and indices outside
    /// `[0, tile_count)` resolve to nothing.
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.cells[y * self.width + x];
        usize::try_from(index).ok().and_then(|i| self.tiles.get(i))
    }

    /// Whether the body's bounding circle touches any solid tile.
    ///
    /// Brute-force scan of every cell; returns on the first hit. Callers
    /// test the *tentative* position before committing a move.
    pub fn check_collision(&self, body: &Body) -> bool {
        for y in 0..self.height {
            for x in 0..self.width {
                let Some(tile) = self.tile_at(x, y) else {
                    continue;
                };
                if tile.has_collision
                    && Self::cell_rect(x, y).intersects_circle(body.position, body.radius)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Draw every valid cell from the tileset. A null tileset draws nothing.
    pub fn draw(&self, canvas: &mut dyn Canvas, tileset: TextureHandle) {
        if tileset.is_null() {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(tile) = self.tile_at(x, y) {
                    draw_texture_checked(
                        canvas,
                        tileset,
                        tile.source,
                        Self::cell_rect(x, y),
                        Color::WHITE,
                    );
                }
            }
        }
    }
}
