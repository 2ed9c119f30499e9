//! Entity spawn factories and handle conversion for the level world.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use ocular_core::constants::PLAYER_RADIUS;
use ocular_core::enums::Archetype;
use ocular_core::types::{Body, EntityKey};
use ocular_enemy_ai::agent::EnemyAgent;

use crate::components::{Player, Projectiles};

/// Spawn the player at `position` with the given health.
pub fn spawn_player(world: &mut World, position: Vec2, health: i32) -> Entity {
    world.spawn((
        Player::new(health),
        Body::new(position, PLAYER_RADIUS),
        Projectiles::default(),
    ))
}

/// Spawn one enemy. Archetypes that shoot also get a projectile list.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: Archetype,
    position: Vec2,
) -> Entity {
    let agent = EnemyAgent::spawn(archetype, position, rng);
    match archetype {
        Archetype::Bee => world.spawn((agent, Projectiles::default())),
        Archetype::Slime | Archetype::Ghost | Archetype::Generic => world.spawn((agent,)),
    }
}

/// Remove every enemy (and the projectiles they own).
pub fn despawn_enemies(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&EnemyAgent>().into_iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Number of enemies still in play.
pub fn active_enemy_count(world: &World) -> usize {
    world
        .query::<&EnemyAgent>()
        .iter()
        .filter(|(_, agent)| agent.active)
        .count()
}

/// Stable key for an entity, suitable for weak references.
pub fn key_of(entity: Entity) -> EntityKey {
    EntityKey(entity.to_bits().get())
}

/// Resolve a key back to a live entity's body. A despawned (or recycled)
/// entity resolves to `None`.
pub fn resolve_body(world: &World, key: EntityKey) -> Option<Body> {
    let entity = Entity::from_bits(key.0)?;
    let body = world.get::<&Body>(entity).ok()?;
    Some(*body)
}
