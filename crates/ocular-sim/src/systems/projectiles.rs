//! Projectile movement: advance every live bullet and expire the ones that
//! leave the level bounds.

use hecs::World;

use ocular_core::types::Rect;

use crate::components::Projectiles;

pub fn run(world: &mut World, bounds: Rect, dt: f32) {
    for (_entity, projectiles) in world.query_mut::<&mut Projectiles>() {
        for bullet in projectiles.0.iter_mut().filter(|b| b.active) {
            bullet.position += bullet.direction * bullet.speed * dt;
            if !bounds.contains(bullet.position) {
                bullet.active = false;
            }
        }
    }
}
