//! Enemy AI system: runs every active enemy's state machine.
//!
//! Calls the FSM from ocular-enemy-ai with the followed entity resolved
//! through its weak key, then records projectiles fired by the step.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use ocular_core::enums::Shooter;
use ocular_core::events::LevelEvent;
use ocular_core::types::Body;
use ocular_enemy_ai::agent::EnemyAgent;
use ocular_enemy_ai::fsm::{self, EnemyContext};
use ocular_tilemap::TileMap;

use crate::components::{Bullet, Projectiles};
use crate::world_setup;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    map: Option<&TileMap>,
    player: Option<Body>,
    dt: f32,
    events: &mut Vec<LevelEvent>,
) {
    // Resolve followed entities first; the world is borrowed mutably below.
    let followed: HashMap<Entity, Option<Body>> = world
        .query::<&EnemyAgent>()
        .iter()
        .filter(|(_, agent)| agent.active)
        .map(|(entity, agent)| {
            let body = agent
                .following
                .and_then(|key| world_setup::resolve_body(world, key));
            (entity, body)
        })
        .collect();

    for (entity, (agent, projectiles)) in
        world.query_mut::<(&mut EnemyAgent, Option<&mut Projectiles>)>()
    {
        let Some(followed) = followed.get(&entity).copied() else {
            continue;
        };
        let ctx = EnemyContext {
            dt,
            followed,
            player,
            map,
        };
        let outcome = fsm::update(agent, &ctx, rng);

        if outcome.phase_changed {
            debug!("{:?} {entity:?} now {:?}", agent.archetype, agent.phase());
        }

        if let Some(direction) = outcome.fired {
            match projectiles {
                Some(projectiles) => {
                    projectiles
                        .0
                        .push(Bullet::fire(Shooter::Bee, agent.position, direction));
                    events.push(LevelEvent::ProjectileFired {
                        shooter: Shooter::Bee,
                    });
                }
                None => debug!("{:?} fired without a projectile list", agent.archetype),
            }
        }
    }
}
