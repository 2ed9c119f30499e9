//! Per-enemy record mutated by the state machine.

use glam::Vec2;
use rand::Rng;

use ocular_core::constants::*;
use ocular_core::enums::{Archetype, EnemyPhase, Facing};
use ocular_core::types::{Body, EntityKey};

use crate::extensions::Extension;
use crate::fsm::{self, EnemyState};
use crate::profiles::get_profile;

/// One enemy: kinematics, sensing radii, health and behavior state.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAgent {
    pub archetype: Archetype,
    pub position: Vec2,
    pub velocity: Vec2,
    /// One-shot impulse consumed by the next Attacking update.
    pub acceleration: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub detection_radius: f32,
    pub aggro_radius: f32,
    pub ready_attack_radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// Cleared the moment health reaches zero; the arena drops the enemy
    /// at the end of the frame.
    pub active: bool,
    pub invulnerable_timer: f32,
    pub flash_timer: f32,
    pub flash_visible: bool,
    pub rotation_degrees: f32,
    pub facing: Facing,
    pub state: EnemyState,
    /// Weak handle to the pursued entity. Resolved every frame; a stale key
    /// resets the enemy to Wandering.
    pub following: Option<EntityKey>,
    pub extension: Extension,
}

impl EnemyAgent {
    /// Build an enemy from its archetype profile, entering Wandering.
    pub fn spawn<R: Rng + ?Sized>(archetype: Archetype, position: Vec2, rng: &mut R) -> Self {
        let profile = get_profile(archetype);
        let mut agent = Self {
            archetype,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            speed: profile.speed,
            radius: profile.radius,
            detection_radius: profile.detection_radius,
            aggro_radius: profile.aggro_radius,
            ready_attack_radius: profile.ready_attack_radius,
            health: profile.max_health,
            max_health: profile.max_health,
            active: true,
            invulnerable_timer: 0.0,
            flash_timer: 0.0,
            flash_visible: true,
            rotation_degrees: 0.0,
            facing: Facing::Down,
            state: EnemyState::Chasing,
            following: None,
            extension: Extension::for_archetype(archetype),
        };
        fsm::enter(&mut agent, EnemyPhase::Wandering, None, rng);
        agent
    }

    pub fn body(&self) -> Body {
        Body::new(self.position, self.radius)
    }

    pub fn wander_speed(&self) -> f32 {
        self.speed * WANDER_SPEED_FACTOR
    }

    pub fn chase_speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> EnemyPhase {
        self.state.phase()
    }

    pub fn is_vulnerable(&self) -> bool {
        self.active && self.invulnerable_timer <= 0.0 && !self.extension.is_phased()
    }

    pub fn is_visible(&self) -> bool {
        self.active && self.flash_visible && !self.extension.is_phased()
    }

    /// Apply damage from a hit. Returns false (and changes nothing) when the
    /// enemy cannot be hurt right now.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_vulnerable() {
            return false;
        }
        self.health -= amount;
        self.invulnerable_timer = ENEMY_HIT_INVULNERABILITY_SECS;
        self.flash_timer = 0.0;
        if self.health <= 0 {
            self.active = false;
        }
        true
    }

    /// Shared end-of-update bookkeeping run after every state's update.
    pub(crate) fn post_update(&mut self, dt: f32) {
        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer -= dt;
            self.flash_timer += dt;
            if self.flash_timer >= ENEMY_FLASH_INTERVAL_SECS {
                self.flash_visible = !self.flash_visible;
                self.flash_timer = 0.0;
            }
        } else {
            self.flash_visible = true;
        }

        self.extension.tick(dt);

        if self.health <= 0 {
            self.active = false;
        }
    }
}
