//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anything that occupies space in the arena: a center and a bounding circle.
///
/// Collision and behavior routines only ever borrow bodies; they never own
/// the entity a body describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub radius: f32,
}

/// Axis-aligned rectangle in world pixels (x, y = top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Stable handle to an entity in the simulation arena.
///
/// Holding a key never keeps the entity alive; resolving a key whose entity
/// was removed yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Distance between the two centers.
    pub fn distance_to(&self, other: &Body) -> f32 {
        self.position.distance(other.position)
    }

    /// True when the two bounding circles strictly overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Same body moved to `position`.
    pub fn at(&self, position: Vec2) -> Body {
        Body {
            position,
            radius: self.radius,
        }
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Circle-vs-rectangle test. Touching counts as a hit.
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.x, self.right()),
            center.y.clamp(self.y, self.bottom()),
        );
        closest.distance_squared(center) <= radius * radius
    }

    /// Rectangle of the same size centered on `center`.
    pub fn centered_on(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Unit vector toward `to`, or zero when the points coincide.
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Rotation in degrees of `heading` measured clockwise from screen-up.
pub fn heading_degrees(heading: Vec2) -> f32 {
    if heading == Vec2::ZERO {
        return 0.0;
    }
    heading.x.atan2(-heading.y).to_degrees()
}
