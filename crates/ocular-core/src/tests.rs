#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use crate::canvas::TextureHandle;
    use crate::commands::PlayerInput;
    use crate::enums::*;
    use crate::events::{LevelEvent, SceneRequest};
    use crate::state::LevelSnapshot;
    use crate::types::*;

    #[test]
    fn test_circle_touching_rect_edge_collides() {
        let tile = Rect::new(16.0, 16.0, 16.0, 16.0);
        // Circle centered 5px left of the tile with radius 5 just touches it.
        assert!(tile.intersects_circle(Vec2::new(11.0, 24.0), 5.0));
        assert!(!tile.intersects_circle(Vec2::new(10.9, 24.0), 5.0));
    }

    #[test]
    fn test_circle_near_rect_corner() {
        let tile = Rect::new(0.0, 0.0, 16.0, 16.0);
        // Diagonal distance to the corner (16,16) is sqrt(50) ~ 7.07.
        assert!(!tile.intersects_circle(Vec2::new(21.0, 21.0), 7.0));
        assert!(tile.intersects_circle(Vec2::new(21.0, 21.0), 7.1));
    }

    #[test]
    fn test_circle_inside_rect_collides() {
        let tile = Rect::new(0.0, 0.0, 16.0, 16.0);
        assert!(tile.intersects_circle(Vec2::new(8.0, 8.0), 1.0));
    }

    #[test]
    fn test_body_overlap_is_strict() {
        let a = Body::new(Vec2::ZERO, 10.0);
        let b = Body::new(Vec2::new(20.0, 0.0), 10.0);
        assert!(!a.overlaps(&b), "exactly touching circles do not overlap");
        let c = b.at(Vec2::new(19.9, 0.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_direction_to_coincident_points_is_zero() {
        assert_eq!(direction_to(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
        let d = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_relative_eq!(d.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_degrees_clockwise_from_up() {
        assert_relative_eq!(heading_degrees(Vec2::new(0.0, -1.0)), 0.0, epsilon = 1e-4);
        assert_relative_eq!(heading_degrees(Vec2::new(1.0, 0.0)), 90.0, epsilon = 1e-4);
        assert_relative_eq!(heading_degrees(Vec2::new(0.0, 1.0)).abs(), 180.0, epsilon = 1e-4);
        assert_eq!(heading_degrees(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_facing_prefers_dominant_axis() {
        assert_eq!(Facing::from_heading(Vec2::new(-3.0, 1.0)), Facing::Left);
        assert_eq!(Facing::from_heading(Vec2::new(1.0, -3.0)), Facing::Up);
        assert_eq!(Facing::from_heading(Vec2::new(2.0, 0.5)), Facing::Right);
        assert_eq!(Facing::from_heading(Vec2::ZERO), Facing::Down);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..10 {
            time.advance(0.1);
        }
        assert_eq!(time.tick, 10);
        assert_relative_eq!(time.elapsed_secs, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_null_texture_handle() {
        assert!(TextureHandle::NULL.is_null());
        assert!(TextureHandle::default().is_null());
        let live = TextureHandle {
            id: 3,
            width: 64,
            height: 64,
        };
        assert!(!live.is_null());
    }

    #[test]
    fn test_scene_request_event_serde() {
        let event = LevelEvent::SceneRequest(SceneRequest::GameOver { score: 120 });
        let json = serde_json::to_string(&event).unwrap();
        let back: LevelEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_serializes_with_events() {
        let snapshot = LevelSnapshot {
            phase: LevelPhase::Playing,
            events: vec![
                LevelEvent::WaveStarted { wave: 1, budget: 10 },
                LevelEvent::EnemySpawned {
                    archetype: Archetype::Slime,
                    position: Vec2::new(0.0, 300.0),
                },
            ],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"WaveStarted\""));
        let back: LevelSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, LevelPhase::Playing);
        assert_eq!(back.events, snapshot.events);
    }

    #[test]
    fn test_player_input_builders() {
        let input = PlayerInput::moving(Vec2::new(1.0, 0.0)).with_fire();
        assert!(input.fire);
        assert_eq!(input.movement, Vec2::X);
        assert_eq!(PlayerInput::idle(), PlayerInput::default());
    }
}
