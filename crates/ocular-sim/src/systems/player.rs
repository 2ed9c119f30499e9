//! Player controller: movement, facing and firing.

use glam::Vec2;
use hecs::World;

use ocular_core::commands::PlayerInput;
use ocular_core::constants::PLAYER_SHOOT_COOLDOWN_SECS;
use ocular_core::enums::{Facing, Shooter};
use ocular_core::events::LevelEvent;
use ocular_core::types::{Body, Rect};
use ocular_tilemap::TileMap;

use crate::components::{Bullet, Player, Projectiles};
use crate::score::ScoreState;

pub fn run(
    world: &mut World,
    input: PlayerInput,
    map: Option<&TileMap>,
    bounds: Rect,
    dt: f32,
    events: &mut Vec<LevelEvent>,
    score: &mut ScoreState,
) {
    for (_entity, (player, body, projectiles)) in
        world.query_mut::<(&mut Player, &mut Body, &mut Projectiles)>()
    {
        if player.hit_cooldown > 0.0 {
            player.hit_cooldown -= dt;
        }
        if player.shoot_cooldown > 0.0 {
            player.shoot_cooldown -= dt;
        }

        let movement = input.movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
        if movement != Vec2::ZERO {
            let heading = movement.normalize();
            player.aim = heading;
            player.facing = Facing::from_heading(heading);
            let step = heading * player.speed * dt;
            move_with_sliding(body, step, map, bounds);
        }

        if input.fire && player.shoot_cooldown <= 0.0 && player.aim != Vec2::ZERO {
            projectiles
                .0
                .push(Bullet::fire(Shooter::Player, body.position, player.aim));
            player.shoot_cooldown = PLAYER_SHOOT_COOLDOWN_SECS;
            score.projectiles_fired += 1;
            events.push(LevelEvent::ProjectileFired {
                shooter: Shooter::Player,
            });
        }
    }
}

/// Try the full step, then each axis alone. A candidate is committed only
/// if its center stays in bounds and the body touches no solid tile.
fn move_with_sliding(body: &mut Body, step: Vec2, map: Option<&TileMap>, bounds: Rect) {
    let candidates = [step, Vec2::new(step.x, 0.0), Vec2::new(0.0, step.y)];
    for delta in candidates {
        if delta == Vec2::ZERO {
            continue;
        }
        let tentative = body.at(body.position + delta);
        if !bounds.contains(tentative.position) {
            continue;
        }
        if map.is_some_and(|m| m.check_collision(&tentative)) {
            continue;
        }
        *body = tentative;
        return;
    }
}
