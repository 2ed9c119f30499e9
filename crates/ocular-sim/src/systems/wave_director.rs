//! Wave director: point-budgeted enemy spawning and wave progression.
//!
//! Each wave gets `base_points + wave * points_per_wave` points. One spawn
//! attempt happens per spawn interval; a wave is cleared once its budget is
//! spent and every enemy it fielded is down, after which a cooldown runs
//! before the next wave.

use glam::Vec2;
use hecs::World;
use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ocular_core::constants::*;
use ocular_core::enums::Archetype;
use ocular_core::events::LevelEvent;
use ocular_core::state::WaveView;
use ocular_core::types::Rect;
use ocular_enemy_ai::profiles::{cheapest_fitting, get_profile, min_cost};

use crate::world_setup;

/// Wave economy tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    pub base_points: u32,
    pub points_per_wave: u32,
    pub spawn_interval_secs: f32,
    pub cooldown_secs: f32,
    /// Random draws per spawn attempt before the cheapest-fit fallback.
    pub max_spawn_attempts: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_points: WAVE_BASE_POINTS,
            points_per_wave: WAVE_POINTS_PER_LEVEL,
            spawn_interval_secs: WAVE_SPAWN_INTERVAL_SECS,
            cooldown_secs: WAVE_COOLDOWN_SECS,
            max_spawn_attempts: WAVE_MAX_SPAWN_ATTEMPTS,
        }
    }
}

/// What changed in the wave cycle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveProgress {
    Unchanged,
    Cleared(u32),
    Started(u32),
}

/// Wave state for one level.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    config: WaveConfig,
    spawn_points: Vec<Vec2>,
    wave: u32,
    budget: u32,
    remaining: u32,
    spawn_timer: f32,
    active: bool,
    cooldown: f32,
}

impl WaveDirector {
    pub fn new(config: WaveConfig, spawn_points: Vec<Vec2>) -> Self {
        Self {
            config,
            spawn_points,
            wave: 0,
            budget: 0,
            remaining: 0,
            spawn_timer: 0.0,
            active: false,
            cooldown: 0.0,
        }
    }

    /// Spawn points for a level: the map's enemy spawns, or the midpoints of
    /// the arena edges when the map names none.
    pub fn spawn_points_for(map_spawns: &[Vec2], arena: Rect) -> Vec<Vec2> {
        if !map_spawns.is_empty() {
            return map_spawns.to_vec();
        }
        let center = arena.center();
        vec![
            Vec2::new(arena.x, center.y),
            Vec2::new(arena.right(), center.y),
            Vec2::new(center.x, arena.y),
            Vec2::new(center.x, arena.bottom()),
        ]
    }

    pub fn budget_for(&self, wave: u32) -> u32 {
        wave.saturating_mul(self.config.points_per_wave)
            .saturating_add(self.config.base_points)
    }

    /// Begin `wave` with a fresh budget. The first spawn attempt happens on
    /// the next director run.
    pub fn start_wave(&mut self, wave: u32) -> u32 {
        self.wave = wave;
        self.budget = self.budget_for(wave);
        self.remaining = self.budget;
        self.spawn_timer = 0.0;
        self.active = true;
        self.cooldown = 0.0;
        info!("wave {wave} started with {} points", self.budget);
        self.budget
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// One spawn attempt: draw random archetypes until one fits the
    /// remaining budget, fall back to the cheapest fitting archetype after
    /// `max_spawn_attempts` misses, and clamp the budget to zero when nothing
    /// fits at all. Returns the archetype and spawn point to field.
    pub fn pick_spawn(&mut self, rng: &mut ChaCha8Rng) -> Option<(Archetype, Vec2)> {
        if self.remaining == 0 || self.spawn_points.is_empty() {
            self.remaining = 0;
            return None;
        }

        let mut choice = None;
        for _ in 0..self.config.max_spawn_attempts {
            let archetype = Archetype::ALL[rng.gen_range(0..Archetype::ALL.len())];
            if get_profile(archetype).cost <= self.remaining {
                choice = Some(archetype);
                break;
            }
        }

        let Some(archetype) = choice.or_else(|| cheapest_fitting(self.remaining)) else {
            debug!(
                "no archetype fits {} points (cheapest costs {}), closing wave budget",
                self.remaining,
                min_cost()
            );
            self.remaining = 0;
            return None;
        };

        self.remaining -= get_profile(archetype).cost;
        let point = self.spawn_points[rng.gen_range(0..self.spawn_points.len())];
        Some((archetype, point))
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            number: self.wave,
            budget: self.budget,
            remaining_points: self.remaining,
            active: self.active,
            cooldown_secs: self.cooldown.max(0.0),
        }
    }
}

/// Spawning step, run at the start of the frame so new enemies act this
/// frame.
pub fn run_spawning(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    dt: f32,
    events: &mut Vec<LevelEvent>,
) {
    if !director.active || director.remaining == 0 {
        return;
    }

    director.spawn_timer -= dt;
    if director.spawn_timer > TIMER_EPSILON {
        return;
    }
    director.spawn_timer = director.config.spawn_interval_secs;

    if let Some((archetype, position)) = director.pick_spawn(rng) {
        world_setup::spawn_enemy(world, rng, archetype, position);
        debug!("spawned {archetype:?} at {position}");
        events.push(LevelEvent::EnemySpawned {
            archetype,
            position,
        });
    }
}

/// Clear-and-advance step: close the wave once its budget is spent and no
/// enemy is active, then start the next one after the cooldown.
pub fn run_progress(
    world: &mut World,
    director: &mut WaveDirector,
    despawn_buffer: &mut Vec<hecs::Entity>,
    dt: f32,
    events: &mut Vec<LevelEvent>,
) -> WaveProgress {
    if director.active {
        if director.remaining == 0 && world_setup::active_enemy_count(world) == 0 {
            director.active = false;
            director.cooldown = director.config.cooldown_secs;
            info!("wave {} cleared", director.wave);
            events.push(LevelEvent::WaveCleared {
                wave: director.wave,
            });
            return WaveProgress::Cleared(director.wave);
        }
        return WaveProgress::Unchanged;
    }

    if director.wave == 0 {
        return WaveProgress::Unchanged;
    }

    director.cooldown -= dt;
    if director.cooldown > TIMER_EPSILON {
        return WaveProgress::Unchanged;
    }

    world_setup::despawn_enemies(world, despawn_buffer);
    let next = director.wave.saturating_add(1);
    let budget = director.start_wave(next);
    events.push(LevelEvent::WaveStarted { wave: next, budget });
    WaveProgress::Started(next)
}
