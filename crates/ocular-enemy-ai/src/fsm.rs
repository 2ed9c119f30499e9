//! Enemy behavior finite state machine.
//!
//! One machine for every archetype. States carry their own transient data
//! (wander heading, ready timer, lunge direction) and that data is written
//! fresh each time a state is entered. Operates on plain data; the caller
//! resolves the followed entity and the tile map beforehand.

use glam::Vec2;
use log::debug;
use rand::Rng;

use ocular_core::constants::*;
use ocular_core::enums::{EnemyPhase, Facing};
use ocular_core::types::{direction_to, heading_degrees, Body, EntityKey};
use ocular_tilemap::TileMap;

use crate::agent::EnemyAgent;
use crate::extensions::Extension;

/// Behavior state plus its per-entry data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    Wandering {
        /// Seconds until a new random heading is rolled.
        cooldown: f32,
        heading: Vec2,
    },
    Chasing,
    Ready {
        /// Seconds left before the lunge.
        timer: f32,
        aim: Vec2,
    },
    Attacking {
        /// Lunge impulse captured on entry; never retargeted.
        direction: Vec2,
    },
}

impl EnemyState {
    pub fn phase(&self) -> EnemyPhase {
        match self {
            EnemyState::Wandering { .. } => EnemyPhase::Wandering,
            EnemyState::Chasing => EnemyPhase::Chasing,
            EnemyState::Ready { .. } => EnemyPhase::Ready,
            EnemyState::Attacking { .. } => EnemyPhase::Attacking,
        }
    }
}

/// What one enemy sees during a frame.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext<'a> {
    pub dt: f32,
    /// Body of the followed entity, or `None` when the handle no longer
    /// resolves.
    pub followed: Option<Body>,
    /// The player, for ranged extensions that aim at it while wandering.
    pub player: Option<Body>,
    /// `None` means nothing obstructs movement.
    pub map: Option<&'a TileMap>,
}

/// Result of one update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    pub phase_changed: bool,
    /// Unit direction of a projectile fired this frame.
    pub fired: Option<Vec2>,
}

/// Enter `phase`, resetting its transient data.
///
/// `followed` is needed to aim Ready and Attacking; entering Attacking
/// without it falls back to Wandering.
pub fn enter<R: Rng + ?Sized>(
    agent: &mut EnemyAgent,
    phase: EnemyPhase,
    followed: Option<Body>,
    rng: &mut R,
) {
    debug!("{:?} -> {:?}", agent.archetype, phase);
    match phase {
        EnemyPhase::Wandering => {
            agent.following = None;
            agent.rotation_degrees = 0.0;
            agent.state = EnemyState::Wandering {
                cooldown: random_cooldown(rng),
                heading: random_heading(rng),
            };
        }
        EnemyPhase::Chasing => {
            agent.state = EnemyState::Chasing;
        }
        EnemyPhase::Ready => {
            agent.velocity = Vec2::ZERO;
            let aim = followed
                .map(|t| direction_to(agent.position, t.position))
                .unwrap_or(Vec2::ZERO);
            agent.state = EnemyState::Ready {
                timer: READY_DURATION_SECS,
                aim,
            };
        }
        EnemyPhase::Attacking => {
            let Some(target) = followed else {
                enter(agent, EnemyPhase::Wandering, None, rng);
                return;
            };
            let direction = direction_to(agent.position, target.position) * LUNGE_ACCELERATION;
            agent.acceleration = direction;
            agent.state = EnemyState::Attacking { direction };
        }
    }
}

/// Advance one enemy by `ctx.dt`: run the current state's update, then the
/// shared bookkeeping (invulnerability, flashing, extensions, death).
pub fn update<R: Rng + ?Sized>(
    agent: &mut EnemyAgent,
    ctx: &EnemyContext<'_>,
    rng: &mut R,
) -> StepOutcome {
    if !agent.active {
        return StepOutcome::default();
    }

    let before = agent.phase();
    let mut fired = None;
    match agent.state {
        EnemyState::Wandering { .. } => fired = update_wandering(agent, ctx, rng),
        EnemyState::Chasing => update_chasing(agent, ctx, rng),
        EnemyState::Ready { .. } => update_ready(agent, ctx, rng),
        EnemyState::Attacking { .. } => update_attacking(agent, ctx, rng),
    }
    agent.post_update(ctx.dt);

    StepOutcome {
        phase_changed: agent.phase() != before,
        fired,
    }
}

/// Radius checks against a sensed entity, run once per frame per enemy.
/// Returns true when the state changed.
///
/// Distances are center to center with strict `<` for detection and ready
/// range; the aggro check fires once the distance reaches the radius.
pub fn handle_collision<R: Rng + ?Sized>(
    agent: &mut EnemyAgent,
    other_key: EntityKey,
    other: &Body,
    rng: &mut R,
) -> bool {
    if !agent.active {
        return false;
    }
    let distance = agent.position.distance(other.position);

    match agent.state {
        EnemyState::Wandering { .. } => {
            if distance < agent.detection_radius {
                agent.following = Some(other_key);
                enter(agent, EnemyPhase::Chasing, Some(*other), rng);
                return true;
            }
            false
        }
        EnemyState::Chasing => {
            if agent.following.is_some_and(|key| key != other_key) {
                return false;
            }
            // Ready is tested before the aggro exit.
            if distance < agent.ready_attack_radius {
                enter(agent, EnemyPhase::Ready, Some(*other), rng);
                return true;
            }
            if distance >= agent.aggro_radius {
                enter(agent, EnemyPhase::Wandering, None, rng);
                return true;
            }
            false
        }
        EnemyState::Ready { .. } | EnemyState::Attacking { .. } => false,
    }
}

fn update_wandering<R: Rng + ?Sized>(
    agent: &mut EnemyAgent,
    ctx: &EnemyContext<'_>,
    rng: &mut R,
) -> Option<Vec2> {
    let EnemyState::Wandering {
        mut cooldown,
        mut heading,
    } = agent.state
    else {
        return None;
    };

    agent.velocity = Vec2::ZERO;
    if cooldown <= 0.0 {
        heading = random_heading(rng);
        cooldown = random_cooldown(rng);
    } else {
        cooldown -= ctx.dt;
    }

    let mut speed = agent.wander_speed();
    let mut fired = None;
    if let Extension::Patrol(patrol) = &mut agent.extension {
        if patrol.arrived(agent.position) {
            if let Some(player) = ctx.player {
                let aim = direction_to(agent.position, player.position);
                if aim != Vec2::ZERO && patrol.try_fire() {
                    fired = Some(aim);
                }
            }
            patrol.swap_waypoint();
        }
        heading = direction_to(agent.position, patrol.waypoint);
        speed = agent.chase_speed();
    }

    let velocity = heading * speed;
    agent.velocity = velocity;
    face(agent, velocity);

    if !try_move(agent, ctx.dt, ctx.map) {
        // Re-roll next frame.
        cooldown = 0.0;
        if let Extension::Patrol(patrol) = &mut agent.extension {
            patrol.swap_waypoint();
        }
    }

    agent.state = EnemyState::Wandering { cooldown, heading };
    fired
}

fn update_chasing<R: Rng + ?Sized>(agent: &mut EnemyAgent, ctx: &EnemyContext<'_>, rng: &mut R) {
    let Some(target) = ctx.followed else {
        enter(agent, EnemyPhase::Wandering, None, rng);
        return;
    };

    let velocity = direction_to(agent.position, target.position) * agent.chase_speed();
    agent.velocity = velocity;
    agent.rotation_degrees = heading_degrees(velocity);
    face(agent, velocity);

    if !try_move(agent, ctx.dt, ctx.map) {
        enter(agent, EnemyPhase::Wandering, None, rng);
    }
}

fn update_ready<R: Rng + ?Sized>(agent: &mut EnemyAgent, ctx: &EnemyContext<'_>, rng: &mut R) {
    let EnemyState::Ready { timer, .. } = agent.state else {
        return;
    };
    let Some(target) = ctx.followed else {
        enter(agent, EnemyPhase::Wandering, None, rng);
        return;
    };

    let aim = direction_to(agent.position, target.position);
    agent.rotation_degrees = heading_degrees(aim);
    face(agent, aim);

    let timer = timer - ctx.dt;
    if timer <= TIMER_EPSILON {
        enter(agent, EnemyPhase::Attacking, Some(target), rng);
    } else {
        agent.state = EnemyState::Ready { timer, aim };
    }
}

fn update_attacking<R: Rng + ?Sized>(
    agent: &mut EnemyAgent,
    ctx: &EnemyContext<'_>,
    rng: &mut R,
) {
    agent.velocity += agent.acceleration;
    agent.velocity -= agent.velocity * LUNGE_DAMPING * ctx.dt;
    agent.acceleration = Vec2::ZERO;

    let moved = try_move(agent, ctx.dt, ctx.map);
    if !moved || agent.velocity.length() < LUNGE_EXIT_SPEED {
        agent.velocity = Vec2::ZERO;
        enter(agent, EnemyPhase::Wandering, None, rng);
    }
}

/// Commit `position + velocity * dt` unless the tentative body touches a
/// solid tile. Returns whether the move was committed.
fn try_move(agent: &mut EnemyAgent, dt: f32, map: Option<&TileMap>) -> bool {
    let tentative = agent.position + agent.velocity * dt;
    if let Some(map) = map {
        if map.check_collision(&Body::new(tentative, agent.radius)) {
            return false;
        }
    }
    agent.position = tentative;
    true
}

fn face(agent: &mut EnemyAgent, heading: Vec2) {
    if heading != Vec2::ZERO {
        agent.facing = Facing::from_heading(heading);
    }
}

fn random_cooldown<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(WANDER_COOLDOWN_MIN_SECS..=WANDER_COOLDOWN_MAX_SECS) as f32
}

/// Random unit heading from a 201x201 lattice, rejecting near-zero draws.
fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    loop {
        let heading = Vec2::new(
            rng.gen_range(-100..=100) as f32 / 100.0,
            rng.gen_range(-100..=100) as f32 / 100.0,
        );
        if heading.length() >= WANDER_MIN_HEADING_LENGTH {
            return heading.normalize();
        }
    }
}
