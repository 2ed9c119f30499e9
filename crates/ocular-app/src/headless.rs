//! Headless stand-ins for the platform layer: a filesystem texture loader, a
//! canvas that only counts primitives, and an autopilot for player input.

use std::path::PathBuf;

use glam::Vec2;
use log::debug;
use serde::Serialize;

use ocular_core::canvas::{Canvas, Color, TextureHandle};
use ocular_core::commands::PlayerInput;
use ocular_core::state::LevelSnapshot;
use ocular_core::types::Rect;
use ocular_sim::AssetLoader;

/// Resolves texture paths under `root` and reads their size from the image
/// header. Anything that is not a readable image fails to load.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_texture(&mut self, path: &str) -> Option<(u32, u32)> {
        let full_path = self.root.join(path);
        match image::image_dimensions(&full_path) {
            Ok(size) => Some(size),
            Err(err) => {
                debug!("cannot read {}: {err}", full_path.display());
                None
            }
        }
    }

    fn unload_texture(&mut self, handle: TextureHandle) {
        debug!("released texture #{}", handle.id);
    }
}

/// Primitive counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    pub textures: u32,
    pub circles: u32,
    pub rects: u32,
    pub texts: u32,
}

#[derive(Debug, Default)]
pub struct HeadlessCanvas {
    pub stats: DrawStats,
    pub in_camera: bool,
}

impl Canvas for HeadlessCanvas {
    fn clear(&mut self, _color: Color) {
        self.stats = DrawStats::default();
    }

    fn begin_camera(&mut self, _target: Vec2, _offset: Vec2, _zoom: f32) {
        self.in_camera = true;
    }

    fn end_camera(&mut self) {
        self.in_camera = false;
    }

    fn draw_texture(&mut self, _texture: TextureHandle, _source: Rect, _dest: Rect, _tint: Color) {
        self.stats.textures += 1;
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.stats.circles += 1;
    }

    fn draw_circle_lines(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.stats.circles += 1;
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {
        self.stats.rects += 1;
    }

    fn draw_text(&mut self, _text: &str, _position: Vec2, _size: f32, _color: Color) {
        self.stats.texts += 1;
    }
}

const STANDOFF: f32 = 220.0;
const AIM_EVERY: u32 = 20;

/// Keep a standoff distance from the nearest enemy, turning toward it every
/// few frames so the shots go its way.
pub fn autopilot(snapshot: &LevelSnapshot, frame: u32) -> PlayerInput {
    let player = snapshot.player.position;
    let nearest = snapshot
        .enemies
        .iter()
        .map(|e| e.position)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

    let Some(enemy) = nearest else {
        return PlayerInput::idle();
    };
    let toward = (enemy - player).normalize_or_zero();
    let movement = if player.distance(enemy) > STANDOFF || frame % AIM_EVERY == 0 {
        toward
    } else {
        -toward
    };
    PlayerInput::moving(movement).with_fire()
}

#[cfg(test)]
mod tests {
    use ocular_core::enums::{Archetype, EnemyPhase, Facing};
    use ocular_core::state::EnemyView;

    use super::*;

    fn write_png(path: &std::path::Path, width: u32, height: u32) {
        image::RgbaImage::new(width, height).save(path).unwrap();
    }

    fn enemy_at(position: Vec2) -> EnemyView {
        EnemyView {
            archetype: Archetype::Slime,
            phase: EnemyPhase::Wandering,
            position,
            radius: 20.0,
            rotation_degrees: 0.0,
            facing: Facing::Down,
            health: 40,
            max_health: 40,
            detection_radius: 120.0,
            aggro_radius: 250.0,
            ready_attack_radius: 50.0,
            visible: true,
            vulnerable: true,
        }
    }

    #[test]
    fn test_loader_reads_png_from_root() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("slime.png"), 128, 64);

        let mut loader = FsAssetLoader::new(dir.path());
        assert_eq!(loader.load_texture("slime.png"), Some((128, 64)));
        assert_eq!(loader.load_texture("missing.png"), None);
    }

    #[test]
    fn test_loader_rejects_non_image_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bee.png"), b"not a png at all").unwrap();

        let mut loader = FsAssetLoader::new(dir.path());
        assert_eq!(loader.load_texture("bee.png"), None);
    }

    #[test]
    fn test_autopilot_idles_without_enemies() {
        let snapshot = LevelSnapshot::default();
        assert_eq!(autopilot(&snapshot, 0), PlayerInput::idle());
    }

    #[test]
    fn test_autopilot_approaches_then_backs_off() {
        let mut snapshot = LevelSnapshot::default();
        snapshot.player.position = Vec2::new(400.0, 300.0);
        snapshot.enemies.push(enemy_at(Vec2::new(700.0, 300.0)));

        let input = autopilot(&snapshot, 1);
        assert!(input.fire);
        assert!(input.movement.x > 0.99);

        snapshot.enemies[0].position = Vec2::new(500.0, 300.0);
        assert!(autopilot(&snapshot, 1).movement.x < -0.99);
        assert!(autopilot(&snapshot, AIM_EVERY).movement.x > 0.99);
    }

    #[test]
    fn test_canvas_counts_primitives() {
        let mut canvas = HeadlessCanvas::default();
        canvas.draw_text("x", Vec2::ZERO, 10.0, Color::WHITE);
        canvas.draw_circle_lines(Vec2::ZERO, 1.0, Color::RED);
        assert_eq!(canvas.stats.texts, 1);
        assert_eq!(canvas.stats.circles, 1);
        canvas.clear(Color::BLACK);
        assert_eq!(canvas.stats, DrawStats::default());
    }
}
