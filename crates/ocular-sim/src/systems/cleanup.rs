//! Cleanup system: removes defeated enemies at the end of the frame.

use hecs::{Entity, World};

use ocular_enemy_ai::agent::EnemyAgent;

/// Despawn every inactive enemy, together with any projectiles it owns.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, agent) in world.query_mut::<&EnemyAgent>() {
        if !agent.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
