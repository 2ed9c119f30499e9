//! Level orchestrator: the core of a play session.
//!
//! `Level` owns the hecs world, the tile map, the wave director and the
//! camera. It runs every system in a fixed order once per frame and reports
//! everything the host must react to through `LevelEvent`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::path::Path;

use hecs::{Entity, World};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ocular_core::canvas::{Canvas, Color, TextureHandle};
use ocular_core::commands::PlayerInput;
use ocular_core::constants::*;
use ocular_core::enums::LevelPhase;
use ocular_core::events::{LevelEvent, SceneRequest};
use ocular_core::state::LevelSnapshot;
use ocular_core::types::{Body, Rect, SimTime};
use ocular_tilemap::{load_tile_info, TileMap};

use crate::components::Player;
use crate::resources::{AssetLoader, ResourceManager};
use crate::score::ScoreState;
use crate::systems;
use crate::systems::camera::Camera;
use crate::systems::render::{DrawContext, LevelTextures};
use crate::systems::wave_director::{WaveConfig, WaveDirector, WaveProgress};
use crate::world_setup;

pub const PLAYER_TEXTURE: &str = "player.png";
pub const SLIME_TEXTURE: &str = "slime.png";
pub const BEE_TEXTURE: &str = "bee.png";
pub const GHOST_TEXTURE: &str = "ghost.png";
pub const ENEMY_TEXTURE: &str = "enemy.png";
pub const BULLET_TEXTURE: &str = "bullet.png";

/// Configuration for a level.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same level.
    pub seed: u64,
    /// Multiplier applied to every frame's dt (1.0 = normal).
    pub time_scale: f32,
    /// Clearing this wave wins the level; `None` plays forever.
    pub final_wave: Option<u32>,
    pub waves: WaveConfig,
    /// Outline bodies and sensing radii when drawing.
    pub debug_draw: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            final_wave: Some(DEFAULT_FINAL_WAVE),
            waves: WaveConfig::default(),
            debug_draw: false,
        }
    }
}

/// One play session on one map.
pub struct Level {
    world: World,
    time: SimTime,
    phase: LevelPhase,
    time_scale: f32,
    final_wave: Option<u32>,
    debug_draw: bool,
    rng: ChaCha8Rng,
    wave_config: WaveConfig,
    start_wave: u32,
    start_health: i32,
    map: Option<TileMap>,
    textures: LevelTextures,
    acquired: Vec<String>,
    player: Option<Entity>,
    director: WaveDirector,
    camera: Camera,
    score: ScoreState,
    input_queue: VecDeque<PlayerInput>,
    input: PlayerInput,
    despawn_buffer: Vec<Entity>,
    events: Vec<LevelEvent>,
}

impl Level {
    /// A fresh level starting at wave 1 with full health.
    pub fn new(config: SimConfig) -> Self {
        Self::continue_from(config, 1, PLAYER_MAX_HEALTH)
    }

    /// A level resuming a saved run at `wave` with `health`.
    pub fn continue_from(config: SimConfig, wave: u32, health: i32) -> Self {
        let mut start_wave = wave.max(1);
        if let Some(final_wave) = config.final_wave {
            start_wave = start_wave.min(final_wave.max(1));
        }
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: LevelPhase::Idle,
            time_scale: config.time_scale,
            final_wave: config.final_wave,
            debug_draw: config.debug_draw,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            wave_config: config.waves.clone(),
            start_wave,
            start_health: health.clamp(1, PLAYER_MAX_HEALTH),
            map: None,
            textures: LevelTextures::default(),
            acquired: Vec::new(),
            player: None,
            director: WaveDirector::new(config.waves, Vec::new()),
            camera: Camera::default(),
            score: ScoreState::default(),
            input_queue: VecDeque::new(),
            input: PlayerInput::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Load the map at `path` and begin. A missing or malformed map is
    /// logged and replaced by an empty one.
    pub fn begin_from_file<L: AssetLoader>(&mut self, path: &Path, resources: &mut ResourceManager<L>) {
        let map = match load_tile_info(path) {
            Ok(map) => map,
            Err(err) => {
                warn!("{err}; continuing without a tile map");
                TileMap::empty()
            }
        };
        self.begin(map, resources);
    }

    /// Set up the world on `map`: player, camera, textures and the first
    /// wave. Emits the entry checkpoint.
    pub fn begin<L: AssetLoader>(&mut self, map: TileMap, resources: &mut ResourceManager<L>) {
        if self.phase != LevelPhase::Idle {
            self.end(resources);
        }

        self.map = (!map.is_empty()).then_some(map);
        self.acquire_textures(resources);

        let bounds = self.bounds();
        let spawn = match &self.map {
            Some(map) => map.player_spawn,
            None => bounds.center(),
        };
        let map_spawns = self.map.as_ref().map_or(&[][..], |m| m.enemy_spawns.as_slice());
        self.director = WaveDirector::new(
            self.wave_config.clone(),
            WaveDirector::spawn_points_for(map_spawns, bounds),
        );

        self.player = Some(world_setup::spawn_player(&mut self.world, spawn, self.start_health));
        self.camera = Camera::new(spawn);
        self.time = SimTime::default();
        self.score = ScoreState::default();
        self.events.clear();
        self.phase = LevelPhase::Playing;

        let budget = self.director.start_wave(self.start_wave);
        self.events.push(LevelEvent::WaveStarted {
            wave: self.start_wave,
            budget,
        });
        self.events.push(LevelEvent::Checkpoint {
            wave: self.start_wave,
            player_health: self.start_health,
        });
        info!(
            "level began at wave {} with {} health",
            self.start_wave, self.start_health
        );
    }

    /// Tear down every entity, timer and texture. Safe to call twice.
    pub fn end<L: AssetLoader>(&mut self, resources: &mut ResourceManager<L>) {
        self.world.clear();
        self.player = None;
        self.map = None;
        self.director = WaveDirector::new(self.wave_config.clone(), Vec::new());
        self.input_queue.clear();
        self.input = PlayerInput::default();
        self.events.clear();
        for path in self.acquired.drain(..) {
            resources.release(&path);
        }
        self.textures = LevelTextures::default();
        if self.phase != LevelPhase::Idle {
            info!("level ended after {} frames", self.time.tick);
        }
        self.phase = LevelPhase::Idle;
    }

    /// Queue player input for processing at the next frame boundary.
    pub fn queue_input(&mut self, input: PlayerInput) {
        self.input_queue.push_back(input);
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(0.0, 4.0);
    }

    /// Advance the level by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.events.clear();
        self.process_input();

        if self.phase != LevelPhase::Playing {
            return;
        }
        let dt = dt * self.time_scale;
        if dt <= 0.0 {
            return;
        }

        self.run_systems(dt);
        self.time.advance(dt);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.phase == LevelPhase::Idle {
            canvas.clear(Color::BLACK);
            return;
        }
        let ctx = DrawContext {
            map: self.map.as_ref(),
            textures: &self.textures,
            camera: &self.camera,
            director: &self.director,
            score: &self.score,
            debug: self.debug_draw,
        };
        systems::render::draw(&self.world, &ctx, canvas);
    }

    /// Events raised during the last frame, leaving none behind.
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Complete visible state, including events not yet drained.
    pub fn snapshot(&self) -> LevelSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.director,
            &self.camera,
            &self.score,
            self.events.clone(),
        )
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn map(&self) -> Option<&TileMap> {
        self.map.as_ref()
    }

    pub fn textures(&self) -> &LevelTextures {
        &self.textures
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player_health(&self) -> Option<i32> {
        let player = self.player?;
        let state = self.world.get::<&Player>(player).ok()?;
        Some(state.health)
    }

    /// Playable area: the map extent, or the default arena without a map.
    pub fn bounds(&self) -> Rect {
        match &self.map {
            Some(map) => map.bounds(),
            None => Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
        }
    }

    #[cfg(test)]
    pub fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: ocular_core::enums::Archetype,
        position: glam::Vec2,
    ) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.rng, archetype, position)
    }

    /// Collapse queued input into this frame's input: the latest movement
    /// wins, fire is set if any queued input fired.
    fn process_input(&mut self) {
        let mut fire = false;
        while let Some(input) = self.input_queue.pop_front() {
            self.input.movement = input.movement;
            fire |= input.fire;
        }
        self.input.fire = fire;
    }

    fn acquire_textures<L: AssetLoader>(&mut self, resources: &mut ResourceManager<L>) {
        let mut acquire = |path: &str| {
            self.acquired.push(path.to_string());
            resources.acquire(path)
        };
        let tileset = match self.map.as_ref().map(|m| m.tileset_path.clone()) {
            Some(path) if !path.is_empty() => acquire(&path),
            _ => TextureHandle::NULL,
        };
        let textures = LevelTextures {
            tileset,
            player: acquire(PLAYER_TEXTURE),
            slime: acquire(SLIME_TEXTURE),
            bee: acquire(BEE_TEXTURE),
            ghost: acquire(GHOST_TEXTURE),
            enemy: acquire(ENEMY_TEXTURE),
            bullet: acquire(BULLET_TEXTURE),
        };
        self.textures = textures;
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let Some(player) = self.player else {
            return;
        };
        let bounds = self.bounds();
        let map = self.map.as_ref();

        // 0. Wave spawning (new enemies act this frame)
        systems::wave_director::run_spawning(
            &mut self.world,
            &mut self.rng,
            &mut self.director,
            dt,
            &mut self.events,
        );
        // 1. Player controller
        systems::player::run(
            &mut self.world,
            self.input,
            map,
            bounds,
            dt,
            &mut self.events,
            &mut self.score,
        );
        let player_body = self.world.get::<&Body>(player).ok().map(|b| *b);
        // 2. Enemy state machines
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            map,
            player_body,
            dt,
            &mut self.events,
        );
        // 3. Projectile movement, then collision passes
        systems::projectiles::run(&mut self.world, bounds, dt);
        systems::collision::run(
            &mut self.world,
            &mut self.rng,
            player,
            &mut self.events,
            &mut self.score,
        );
        // 4. Wave clear / advance
        let progress = systems::wave_director::run_progress(
            &mut self.world,
            &mut self.director,
            &mut self.despawn_buffer,
            dt,
            &mut self.events,
        );
        // 5. Terminal conditions
        self.check_terminal(player, progress);
        // 6. Camera follow
        if let Ok(body) = self.world.get::<&Body>(player) {
            self.camera.follow(body.position);
        }
        // 7. Cleanup (defeated enemies)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn check_terminal(&mut self, player: Entity, progress: WaveProgress) {
        let health = self
            .world
            .get::<&Player>(player)
            .map(|p| p.health)
            .unwrap_or(0);

        if health <= 0 {
            self.phase = LevelPhase::Defeat;
            info!("player defeated on wave {}", self.director.wave());
            self.events
                .push(LevelEvent::SceneRequest(SceneRequest::GameOver {
                    score: self.score.points,
                }));
            return;
        }

        if let WaveProgress::Cleared(wave) = progress {
            if self.final_wave.is_some_and(|last| wave >= last) {
                self.phase = LevelPhase::Victory;
                info!("final wave {wave} cleared");
                self.events
                    .push(LevelEvent::SceneRequest(SceneRequest::Victory {
                        score: self.score.points,
                    }));
            } else {
                self.events.push(LevelEvent::Checkpoint {
                    wave: wave.saturating_add(1),
                    player_health: health,
                });
            }
        }
    }
}
