//! Long-running level on a walled map: no body ever rests on a solid tile.

use glam::Vec2;

use ocular_core::commands::PlayerInput;
use ocular_core::constants::DT;
use ocular_core::events::LevelEvent;
use ocular_core::types::{Body, Rect};
use ocular_sim::{AssetLoader, Level, ResourceManager, SimConfig};
use ocular_tilemap::{Tile, TileMap};

struct NullLoader;

impl AssetLoader for NullLoader {
    fn load_texture(&mut self, _path: &str) -> Option<(u32, u32)> {
        None
    }

    fn unload_texture(&mut self, _handle: ocular_core::canvas::TextureHandle) {}
}

const ENEMY_SPAWNS: [Vec2; 3] = [
    Vec2::new(600.0, 150.0),
    Vec2::new(200.0, 450.0),
    Vec2::new(650.0, 450.0),
];

/// 50x38 cells: solid border, solid pillar in the middle, floor elsewhere.
fn walled_map() -> TileMap {
    let tiles = vec![
        Tile {
            source: Rect::new(0.0, 0.0, 16.0, 16.0),
            has_collision: false,
        },
        Tile {
            source: Rect::new(16.0, 0.0, 16.0, 16.0),
            has_collision: true,
        },
    ];
    let (width, height) = (50usize, 38usize);
    let rows: Vec<Vec<i32>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                    let pillar = (20..25).contains(&x) && (15..20).contains(&y);
                    i32::from(border || pillar)
                })
                .collect()
        })
        .collect();
    let rows: Vec<&[i32]> = rows.iter().map(|r| r.as_slice()).collect();
    TileMap::from_rows(tiles, &rows).with_spawns(Vec2::new(100.0, 100.0), ENEMY_SPAWNS.to_vec())
}

fn autopilot(frame: u32) -> PlayerInput {
    let angle = (frame / 45) as f32 * std::f32::consts::FRAC_PI_4;
    PlayerInput::moving(Vec2::new(angle.cos(), angle.sin())).with_fire()
}

#[test]
fn bodies_never_overlap_solid_tiles() {
    let map = walled_map();
    let mut resources = ResourceManager::new(NullLoader);
    let mut level = Level::new(SimConfig {
        seed: 77,
        ..Default::default()
    });
    level.begin(map.clone(), &mut resources);

    for frame in 0..3600 {
        level.queue_input(autopilot(frame));
        level.update(DT);

        let snap = level.snapshot();
        let player = Body::new(snap.player.position, snap.player.radius);
        assert!(
            !map.check_collision(&player),
            "player inside a wall at frame {frame}: {:?}",
            player.position
        );
        for enemy in &snap.enemies {
            let body = Body::new(enemy.position, enemy.radius);
            assert!(
                !map.check_collision(&body),
                "{:?} inside a wall at frame {frame}: {:?}",
                enemy.archetype,
                body.position
            );
        }
    }
}

#[test]
fn enemies_enter_at_map_spawn_points() {
    let mut resources = ResourceManager::new(NullLoader);
    let mut level = Level::new(SimConfig::default());
    level.begin(walled_map(), &mut resources);

    let mut spawned = 0;
    for frame in 0..600 {
        level.queue_input(autopilot(frame));
        level.update(DT);
        for event in level.drain_events() {
            if let LevelEvent::EnemySpawned { position, .. } = event {
                assert!(ENEMY_SPAWNS.contains(&position));
                spawned += 1;
            }
        }
    }
    assert!(spawned > 0);
}

#[test]
fn player_starts_at_map_spawn() {
    let mut resources = ResourceManager::new(NullLoader);
    let mut level = Level::new(SimConfig::default());
    level.begin(walled_map(), &mut resources);

    let snap = level.snapshot();
    assert_eq!(snap.player.position, Vec2::new(100.0, 100.0));
    assert_eq!(snap.camera.target, Vec2::new(100.0, 100.0));
    assert_eq!(level.bounds(), Rect::new(0.0, 0.0, 800.0, 608.0));
}
