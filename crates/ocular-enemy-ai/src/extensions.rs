//! Archetype extensions that run beside the shared state machine.

use glam::Vec2;

use ocular_core::constants::*;
use ocular_core::enums::Archetype;

/// Extra per-archetype behavior carried by an enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extension {
    None,
    /// Ghost visibility/vulnerability cycle.
    Phasing(PhaseCycle),
    /// Bee waypoint patrol and ranged attack.
    Patrol(Patrol),
}

impl Extension {
    pub fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Ghost => Extension::Phasing(PhaseCycle::new()),
            Archetype::Bee => Extension::Patrol(Patrol::new()),
            Archetype::Slime | Archetype::Generic => Extension::None,
        }
    }

    /// Advance timers that run regardless of the behavior state.
    pub fn tick(&mut self, dt: f32) {
        match self {
            Extension::Phasing(cycle) => cycle.tick(dt),
            Extension::Patrol(patrol) => patrol.tick(dt),
            Extension::None => {}
        }
    }

    /// True while the enemy is phased out (hidden and immune).
    pub fn is_phased(&self) -> bool {
        matches!(self, Extension::Phasing(cycle) if cycle.is_phased())
    }
}

/// Countdown over one phasing period. The ghost is solid for the first half
/// of each period and phased for the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCycle {
    pub timer: f32,
}

impl PhaseCycle {
    pub fn new() -> Self {
        Self {
            timer: GHOST_PHASE_PERIOD_SECS,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer += GHOST_PHASE_PERIOD_SECS;
        }
    }

    pub fn is_phased(&self) -> bool {
        self.timer <= GHOST_PHASED_BELOW_SECS
    }
}

impl Default for PhaseCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Back-and-forth flight between two fixed waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    /// Waypoint currently flown toward.
    pub waypoint: Vec2,
    /// Seconds until the bee may fire again.
    pub fire_cooldown: f32,
}

impl Patrol {
    pub fn new() -> Self {
        Self {
            waypoint: Vec2::from(BEE_WAYPOINT_B),
            fire_cooldown: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
    }

    /// Turn around toward the other waypoint.
    pub fn swap_waypoint(&mut self) {
        let a = Vec2::from(BEE_WAYPOINT_A);
        let b = Vec2::from(BEE_WAYPOINT_B);
        self.waypoint = if self.waypoint == a { b } else { a };
    }

    pub fn arrived(&self, position: Vec2) -> bool {
        position.distance(self.waypoint) < BEE_ARRIVAL_DISTANCE
    }

    /// Consume the shot if the cooldown allows one.
    pub fn try_fire(&mut self) -> bool {
        if self.fire_cooldown > 0.0 {
            return false;
        }
        self.fire_cooldown = BEE_FIRE_COOLDOWN_SECS;
        true
    }
}

impl Default for Patrol {
    fn default() -> Self {
        Self::new()
    }
}
