//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype constants for the enemy state machine and the
//! wave economy.

use ocular_core::enums::Archetype;

/// Behavioral and economic profile for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Chase speed (px/s). Wandering uses half of it.
    pub speed: f32,
    /// Bounding circle radius (px).
    pub radius: f32,
    /// Distance under which a wandering enemy starts chasing.
    pub detection_radius: f32,
    /// Distance at or beyond which a chasing enemy gives up.
    pub aggro_radius: f32,
    /// Distance under which a chasing enemy stops to wind up a lunge.
    pub ready_attack_radius: f32,
    pub max_health: i32,
    /// Damage dealt to the player on body contact.
    pub contact_damage: i32,
    /// Wave budget points consumed when spawned.
    pub cost: u32,
    /// Score awarded when defeated.
    pub bounty: u32,
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: Archetype) -> EnemyProfile {
    match archetype {
        Archetype::Slime => EnemyProfile {
            speed: 30.0,
            radius: 20.0,
            detection_radius: 120.0,
            aggro_radius: 250.0,
            ready_attack_radius: 50.0,
            max_health: 40,
            contact_damage: 10,
            cost: 1,
            bounty: 10,
        },
        Archetype::Bee => EnemyProfile {
            speed: 80.0,
            radius: 20.0,
            detection_radius: 150.0,
            aggro_radius: 300.0,
            ready_attack_radius: 60.0,
            max_health: 30,
            contact_damage: 10,
            cost: 3,
            bounty: 20,
        },
        Archetype::Ghost => EnemyProfile {
            speed: 40.0,
            radius: 20.0,
            detection_radius: 100.0,
            aggro_radius: 250.0,
            ready_attack_radius: 50.0,
            max_health: 20,
            contact_damage: 10,
            cost: 4,
            bounty: 15,
        },
        Archetype::Generic => EnemyProfile {
            speed: 100.0,
            radius: 15.0,
            detection_radius: 100.0,
            aggro_radius: 250.0,
            ready_attack_radius: 50.0,
            max_health: 20,
            contact_damage: 10,
            cost: 2,
            bounty: 5,
        },
    }
}

/// Cheapest archetype whose cost fits in `budget`, if any.
pub fn cheapest_fitting(budget: u32) -> Option<Archetype> {
    Archetype::ALL
        .into_iter()
        .filter(|a| get_profile(*a).cost <= budget)
        .min_by_key(|a| get_profile(*a).cost)
}

/// Lowest cost over all archetypes.
pub fn min_cost() -> u32 {
    Archetype::ALL
        .into_iter()
        .map(|a| get_profile(a).cost)
        .min()
        .unwrap_or(0)
}
