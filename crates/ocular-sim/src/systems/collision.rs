//! Collision passes, in order: enemy vs player (sensing and contact
//! damage), player projectiles vs enemies, enemy projectiles vs player.
//! Inactive bullets are purged at the end.

use hecs::{Entity, World};
use log::{debug, info};
use rand_chacha::ChaCha8Rng;

use ocular_core::events::LevelEvent;
use ocular_core::types::Body;
use ocular_enemy_ai::agent::EnemyAgent;
use ocular_enemy_ai::fsm;
use ocular_enemy_ai::profiles::get_profile;

use crate::components::{Bullet, Player, Projectiles};
use crate::score::ScoreState;
use crate::world_setup;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: Entity,
    events: &mut Vec<LevelEvent>,
    score: &mut ScoreState,
) {
    let player_body = world.get::<&Body>(player).ok().map(|b| *b);
    if let Some(player_body) = player_body {
        enemies_vs_player(world, rng, player, player_body, events);
        player_bullets_vs_enemies(world, player, events, score);
        enemy_bullets_vs_player(world, player, player_body, events);
    }

    for (_entity, projectiles) in world.query_mut::<&mut Projectiles>() {
        projectiles.purge();
    }
}

fn enemies_vs_player(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: Entity,
    player_body: Body,
    events: &mut Vec<LevelEvent>,
) {
    let player_key = world_setup::key_of(player);
    let mut contacts = Vec::new();

    for (_entity, agent) in world.query_mut::<&mut EnemyAgent>() {
        if !agent.active {
            continue;
        }
        fsm::handle_collision(agent, player_key, &player_body, rng);
        if !agent.extension.is_phased() && agent.body().overlaps(&player_body) {
            contacts.push(get_profile(agent.archetype).contact_damage);
        }
    }

    if contacts.is_empty() {
        return;
    }
    if let Ok(mut state) = world.get::<&mut Player>(player) {
        for damage in contacts {
            if state.take_damage(damage) {
                debug!("player hit for {damage}, {} left", state.health);
                events.push(LevelEvent::PlayerHit {
                    damage,
                    health: state.health,
                });
            }
        }
    }
}

fn player_bullets_vs_enemies(
    world: &mut World,
    player: Entity,
    events: &mut Vec<LevelEvent>,
    score: &mut ScoreState,
) {
    let mut bullets: Vec<Bullet> = match world.get::<&mut Projectiles>(player) {
        Ok(mut projectiles) => std::mem::take(&mut projectiles.0),
        Err(_) => return,
    };

    for bullet in bullets.iter_mut().filter(|b| b.active) {
        for (_entity, agent) in world.query_mut::<&mut EnemyAgent>() {
            if !agent.active || !bullet.body().overlaps(&agent.body()) {
                continue;
            }
            // Invulnerable or phased targets let the bullet through.
            if !agent.take_damage(bullet.damage) {
                continue;
            }
            bullet.active = false;
            events.push(LevelEvent::EnemyHit {
                archetype: agent.archetype,
                damage: bullet.damage,
            });
            if !agent.active {
                let bounty = get_profile(agent.archetype).bounty;
                score.points += bounty;
                score.enemies_defeated += 1;
                info!("{:?} defeated (+{bounty})", agent.archetype);
                events.push(LevelEvent::EnemyDefeated {
                    archetype: agent.archetype,
                    bounty,
                });
            }
            break;
        }
    }

    if let Ok(mut projectiles) = world.get::<&mut Projectiles>(player) {
        projectiles.0 = bullets;
    }
}

fn enemy_bullets_vs_player(
    world: &mut World,
    player: Entity,
    player_body: Body,
    events: &mut Vec<LevelEvent>,
) {
    let Ok(mut state) = world.get::<&mut Player>(player) else {
        return;
    };

    for (_entity, (projectiles, _agent)) in world
        .query::<(&mut Projectiles, &EnemyAgent)>()
        .iter()
    {
        for bullet in projectiles.0.iter_mut().filter(|b| b.active) {
            if !bullet.body().overlaps(&player_body) {
                continue;
            }
            // Passes through during the post-hit grace period.
            if !state.take_damage(bullet.damage) {
                continue;
            }
            bullet.active = false;
            events.push(LevelEvent::PlayerHit {
                damage: bullet.damage,
                health: state.health,
            });
        }
    }
}
