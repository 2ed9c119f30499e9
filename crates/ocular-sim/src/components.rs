//! ECS components stored in the level world.
//!
//! Enemies are stored as a single `EnemyAgent` component (plus
//! `Projectiles` for archetypes that shoot); the player carries `Player`,
//! a `Body` and its own `Projectiles`.

use glam::Vec2;

use ocular_core::constants::*;
use ocular_core::enums::{Facing, Shooter};
use ocular_core::types::Body;

/// Player controller state. Position lives in the entity's `Body`.
#[derive(Debug, Clone)]
pub struct Player {
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// Grace period after taking damage; no damage lands while positive.
    pub hit_cooldown: f32,
    pub shoot_cooldown: f32,
    /// Last non-zero movement direction, normalized. Zero until the player
    /// first moves.
    pub aim: Vec2,
    pub facing: Facing,
}

impl Player {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            hit_cooldown: 0.0,
            shoot_cooldown: 0.0,
            aim: Vec2::ZERO,
            facing: Facing::Down,
        }
    }

    pub fn is_recovering(&self) -> bool {
        self.hit_cooldown > 0.0
    }

    /// Apply damage unless the grace period is running. Returns whether the
    /// damage landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_recovering() {
            return false;
        }
        self.health -= amount;
        self.hit_cooldown = PLAYER_HIT_COOLDOWN_SECS;
        true
    }
}

/// A single projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub shooter: Shooter,
    pub position: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub active: bool,
}

impl Bullet {
    /// Create a projectile with the fixed stats of its shooter.
    pub fn fire(shooter: Shooter, origin: Vec2, direction: Vec2) -> Self {
        let (speed, radius, damage) = match shooter {
            Shooter::Player => (PLAYER_BULLET_SPEED, PLAYER_BULLET_RADIUS, PLAYER_BULLET_DAMAGE),
            Shooter::Bee => (BEE_BULLET_SPEED, BEE_BULLET_RADIUS, BEE_BULLET_DAMAGE),
        };
        Self {
            shooter,
            position: origin,
            direction: direction.normalize_or_zero(),
            speed,
            radius,
            damage,
            active: true,
        }
    }

    pub fn body(&self) -> Body {
        Body::new(self.position, self.radius)
    }
}

/// Ordered list of projectiles owned by the entity that fired them.
#[derive(Debug, Clone, Default)]
pub struct Projectiles(pub Vec<Bullet>);

impl Projectiles {
    /// Drop every inactive bullet.
    pub fn purge(&mut self) {
        self.0.retain(|b| b.active);
    }
}
