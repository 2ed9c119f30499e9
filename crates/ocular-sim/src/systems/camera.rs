//! Camera follow with a soft tracking window.
//!
//! A square window travels with the camera. While the player is inside it
//! the camera drifts toward the player by at most `drift` per frame on each
//! axis; once the player leaves it the camera and window jump by exactly the
//! overshoot.

use glam::Vec2;

use ocular_core::constants::*;
use ocular_core::state::CameraView;
use ocular_core::types::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    pub window: Rect,
    pub drift: f32,
}

impl Camera {
    pub fn new(focus: Vec2) -> Self {
        Self {
            target: focus,
            offset: Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
            zoom: 1.0,
            window: Rect::centered_on(focus, CAMERA_WINDOW_SIZE, CAMERA_WINDOW_SIZE),
            drift: CAMERA_DRIFT,
        }
    }

    pub fn follow(&mut self, player: Vec2) {
        let center = self.window.center();
        let push_x = axis_push(player.x, self.window.x, self.window.right(), center.x, self.drift);
        let push_y = axis_push(player.y, self.window.y, self.window.bottom(), center.y, self.drift);
        self.target += Vec2::new(push_x, push_y);
        self.window.x += push_x;
        self.window.y += push_y;
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            target: self.target,
            offset: self.offset,
            zoom: self.zoom,
            window: self.window,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

fn axis_push(player: f32, low: f32, high: f32, center: f32, drift: f32) -> f32 {
    if player > high {
        player - high
    } else if player < low {
        player - low
    } else {
        (player - center).clamp(-drift, drift)
    }
}
