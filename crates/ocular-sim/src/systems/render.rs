//! Draw pass: emits draw primitives for the current world state.
//!
//! Read-only over the world. Every texture goes through
//! `draw_texture_checked`, so missing assets simply draw nothing.

use glam::Vec2;
use hecs::World;

use ocular_core::canvas::{draw_texture_checked, Canvas, Color, TextureHandle};
use ocular_core::enums::{Archetype, EnemyPhase, Facing, Shooter};
use ocular_core::types::{Body, Rect};
use ocular_enemy_ai::agent::EnemyAgent;
use ocular_tilemap::TileMap;

use crate::components::{Player, Projectiles};
use crate::score::ScoreState;
use crate::systems::camera::Camera;
use crate::systems::wave_director::WaveDirector;

/// Sprite sheets are laid out as four facing rows of four frames.
const SHEET_COLUMNS: u32 = 4;
const SHEET_ROWS: u32 = 4;

/// Texture handles a level holds between `begin` and `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelTextures {
    pub tileset: TextureHandle,
    pub player: TextureHandle,
    pub slime: TextureHandle,
    pub bee: TextureHandle,
    pub ghost: TextureHandle,
    pub enemy: TextureHandle,
    pub bullet: TextureHandle,
}

impl LevelTextures {
    pub fn for_archetype(&self, archetype: Archetype) -> TextureHandle {
        match archetype {
            Archetype::Slime => self.slime,
            Archetype::Bee => self.bee,
            Archetype::Ghost => self.ghost,
            Archetype::Generic => self.enemy,
        }
    }
}

/// Inputs of one draw pass besides the world itself.
pub struct DrawContext<'a> {
    pub map: Option<&'a TileMap>,
    pub textures: &'a LevelTextures,
    pub camera: &'a Camera,
    pub director: &'a WaveDirector,
    pub score: &'a ScoreState,
    /// Also outline bodies and sensing radii.
    pub debug: bool,
}

pub fn draw(world: &World, ctx: &DrawContext<'_>, canvas: &mut dyn Canvas) {
    canvas.clear(Color::BLACK);
    canvas.begin_camera(ctx.camera.target, ctx.camera.offset, ctx.camera.zoom);

    if let Some(map) = ctx.map {
        map.draw(canvas, ctx.textures.tileset);
    }

    let mut health = None;
    for (_, (player, body)) in world.query::<(&Player, &Body)>().iter() {
        draw_sprite(canvas, ctx.textures.player, body, player.facing, Color::WHITE);
        if ctx.debug {
            canvas.draw_circle_lines(body.position, body.radius, Color::WHITE);
        }
        health = Some(player.health);
    }

    for (_, agent) in world.query::<&EnemyAgent>().iter() {
        if !agent.is_visible() {
            continue;
        }
        let texture = ctx.textures.for_archetype(agent.archetype);
        draw_sprite(canvas, texture, &agent.body(), agent.facing, Color::WHITE);
        if ctx.debug {
            canvas.draw_circle_lines(agent.position, agent.radius, phase_color(agent.phase()));
            canvas.draw_circle_lines(agent.position, agent.detection_radius, Color::VIOLET);
            canvas.draw_circle_lines(agent.position, agent.aggro_radius, Color::BLUE);
        }
    }

    for (_, projectiles) in world.query::<&Projectiles>().iter() {
        for bullet in projectiles.0.iter().filter(|b| b.active) {
            let tint = match bullet.shooter {
                Shooter::Player => Color::WHITE,
                Shooter::Bee => Color::YELLOW,
            };
            let source = full_source(ctx.textures.bullet);
            let dest = Rect::centered_on(bullet.position, bullet.radius * 2.0, bullet.radius * 2.0);
            draw_texture_checked(canvas, ctx.textures.bullet, source, dest, tint);
            if ctx.debug {
                canvas.draw_circle_lines(bullet.position, bullet.radius, tint);
            }
        }
    }

    canvas.end_camera();

    if let Some(health) = health {
        canvas.draw_text(&health.to_string(), Vec2::new(10.0, 10.0), 50.0, Color::WHITE);
    }
    let wave = ctx.director.view();
    canvas.draw_text(
        &format!("Wave {}  Score {}", wave.number, ctx.score.points),
        Vec2::new(10.0, 70.0),
        20.0,
        Color::WHITE,
    );
}

fn draw_sprite(canvas: &mut dyn Canvas, texture: TextureHandle, body: &Body, facing: Facing, tint: Color) {
    let frame_w = (texture.width / SHEET_COLUMNS) as f32;
    let frame_h = (texture.height / SHEET_ROWS) as f32;
    let source = Rect::new(0.0, facing.row() as f32 * frame_h, frame_w, frame_h);
    let dest = Rect::centered_on(body.position, body.radius * 2.0, body.radius * 2.0);
    draw_texture_checked(canvas, texture, source, dest, tint);
}

fn full_source(texture: TextureHandle) -> Rect {
    Rect::new(0.0, 0.0, texture.width as f32, texture.height as f32)
}

fn phase_color(phase: EnemyPhase) -> Color {
    match phase {
        EnemyPhase::Wandering => Color::VIOLET,
        EnemyPhase::Chasing => Color::YELLOW,
        EnemyPhase::Ready => Color::ORANGE,
        EnemyPhase::Attacking => Color::RED,
    }
}
