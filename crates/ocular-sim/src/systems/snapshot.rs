//! Snapshot system: queries the world and builds a complete LevelSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use ocular_core::enums::LevelPhase;
use ocular_core::events::LevelEvent;
use ocular_core::state::*;
use ocular_core::types::{Body, SimTime};
use ocular_enemy_ai::agent::EnemyAgent;

use crate::components::{Player, Projectiles};
use crate::score::ScoreState;
use crate::systems::camera::Camera;
use crate::systems::wave_director::WaveDirector;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: LevelPhase,
    director: &WaveDirector,
    camera: &Camera,
    score: &ScoreState,
    events: Vec<LevelEvent>,
) -> LevelSnapshot {
    LevelSnapshot {
        time: *time,
        phase,
        wave: director.view(),
        player: build_player(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        camera: camera.view(),
        score: score.view(),
        events,
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<(&Player, &Body)>()
        .iter()
        .next()
        .map(|(_, (player, body))| PlayerView {
            position: body.position,
            radius: body.radius,
            health: player.health,
            max_health: player.max_health,
            facing: player.facing,
            recovering: player.is_recovering(),
        })
        .unwrap_or_default()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<&EnemyAgent>()
        .iter()
        .filter(|(_, agent)| agent.active)
        .map(|(_, agent)| EnemyView {
            archetype: agent.archetype,
            phase: agent.phase(),
            position: agent.position,
            radius: agent.radius,
            rotation_degrees: agent.rotation_degrees,
            facing: agent.facing,
            health: agent.health,
            max_health: agent.max_health,
            detection_radius: agent.detection_radius,
            aggro_radius: agent.aggro_radius,
            ready_attack_radius: agent.ready_attack_radius,
            visible: agent.is_visible(),
            vulnerable: agent.is_vulnerable(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views = Vec::new();
    for (_, projectiles) in world.query::<&Projectiles>().iter() {
        views.extend(
            projectiles
                .0
                .iter()
                .filter(|b| b.active)
                .map(|b| ProjectileView {
                    shooter: b.shooter,
                    position: b.position,
                    radius: b.radius,
                }),
        );
    }
    views
}
