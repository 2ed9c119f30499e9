#[cfg(test)]
mod tests {
    use std::io::Write;

    use glam::Vec2;

    use ocular_core::canvas::{Canvas, Color, TextureHandle};
    use ocular_core::types::{Body, Rect};

    use crate::grid::{Tile, TileMap};
    use crate::loader::{load_tile_info, parse_tile_info, TileMapError};

    fn floor_and_wall() -> Vec<Tile> {
        vec![
            Tile {
                source: Rect::new(0.0, 0.0, 16.0, 16.0),
                has_collision: false,
            },
            Tile {
                source: Rect::new(16.0, 0.0, 16.0, 16.0),
                has_collision: true,
            },
        ]
    }

    /// 3x3 map with a single wall in the middle cell (16..32, 16..32).
    fn center_wall_map() -> TileMap {
        TileMap::from_rows(floor_and_wall(), &[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]])
    }

    #[derive(Default)]
    struct RecordingCanvas {
        textures: Vec<(Rect, Rect)>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _color: Color) {}
        fn begin_camera(&mut self, _target: Vec2, _offset: Vec2, _zoom: f32) {}
        fn end_camera(&mut self) {}
        fn draw_texture(&mut self, _texture: TextureHandle, source: Rect, dest: Rect, _tint: Color) {
            self.textures.push((source, dest));
        }
        fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn draw_circle_lines(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn draw_rect(&mut self, _rect: Rect, _color: Color) {}
        fn draw_text(&mut self, _text: &str, _position: Vec2, _size: f32, _color: Color) {}
    }

    const SAMPLE: &str = "\
assets/tiles.png
2
0 0 16 16 0
16 0 16 16 1
3 2
0 1 0
0 0 1
48 24
10 10
200 40
";

    #[test]
    fn test_body_touching_wall_collides() {
        let map = center_wall_map();
        assert!(map.check_collision(&Body::new(Vec2::new(24.0, 24.0), 1.0)));
        // Left of the wall by exactly the radius.
        assert!(map.check_collision(&Body::new(Vec2::new(11.0, 24.0), 5.0)));
        assert!(!map.check_collision(&Body::new(Vec2::new(10.0, 24.0), 5.0)));
    }

    #[test]
    fn test_non_collidable_tiles_are_ignored() {
        let map = TileMap::from_rows(floor_and_wall(), &[&[0, 0], &[0, 0]]);
        assert!(!map.check_collision(&Body::new(Vec2::new(16.0, 16.0), 30.0)));
    }

    #[test]
    fn test_out_of_range_indices_are_empty() {
        let map = TileMap::from_rows(floor_and_wall(), &[&[-1, 7], &[2, 0]]);
        assert!(map.tile_at(0, 0).is_none());
        assert!(map.tile_at(1, 0).is_none());
        assert!(map.tile_at(0, 1).is_none());
        assert!(map.tile_at(1, 1).is_some());
        assert!(map.tile_at(5, 5).is_none());
        assert!(!map.check_collision(&Body::new(Vec2::new(16.0, 16.0), 40.0)));
    }

    #[test]
    fn test_empty_map_never_collides() {
        let map = TileMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.bounds(), Rect::new(0.0, 0.0, 0.0, 0.0));
        assert!(!map.check_collision(&Body::new(Vec2::ZERO, 100.0)));
    }

    #[test]
    fn test_bounds_cover_grid() {
        let map = center_wall_map();
        assert_eq!(map.bounds(), Rect::new(0.0, 0.0, 48.0, 48.0));
    }

    #[test]
    fn test_parse_sample_map() {
        let map = parse_tile_info(SAMPLE).unwrap();
        assert_eq!(map.tileset_path, "assets/tiles.png");
        assert_eq!(map.tile_count(), 2);
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert!(map.tile_at(1, 0).unwrap().has_collision);
        assert!(!map.tile_at(0, 1).unwrap().has_collision);
        assert!(map.tile_at(2, 1).unwrap().has_collision);
        assert_eq!(map.player_spawn, Vec2::new(48.0, 24.0));
        assert_eq!(
            map.enemy_spawns,
            vec![Vec2::new(10.0, 10.0), Vec2::new(200.0, 40.0)]
        );
    }

    #[test]
    fn test_parse_ignores_spawns_beyond_three() {
        let text = "t.png 1 0 0 16 16 0 1 1 0 5 5 1 1 2 2 3 3 4 4";
        let map = parse_tile_info(text).unwrap();
        assert_eq!(map.enemy_spawns.len(), 3);
        assert_eq!(map.enemy_spawns[2], Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_parse_clamps_oversized_map() {
        let mut text = String::from("t.png 1 0 0 16 16 1 101 1\n");
        for _ in 0..101 {
            text.push_str("0 ");
        }
        text.push_str("\n7 8\n");
        let map = parse_tile_info(&text).unwrap();
        assert_eq!(map.width(), 100);
        assert_eq!(map.height(), 1);
        // The discarded 101st cell did not shift the spawn coordinates.
        assert_eq!(map.player_spawn, Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_parse_truncated_file_errors() {
        let err = parse_tile_info("t.png 1 0 0 16 16 1 2 2 0 0").unwrap_err();
        assert!(matches!(err, TileMapError::UnexpectedEnd { field: "tile index" }));
    }

    #[test]
    fn test_parse_garbage_errors() {
        let err = parse_tile_info("t.png two").unwrap_err();
        assert!(matches!(err, TileMapError::InvalidValue { field: "tile count", .. }));
    }

    #[test]
    fn test_parse_rejects_tile_count_beyond_file() {
        let err = parse_tile_info("tiles.png 18446744073709551615 0 0 16 16 1").unwrap_err();
        assert!(matches!(err, TileMapError::InvalidValue { field: "tile count", .. }));

        let err = parse_tile_info("tiles.png 3 0 0 16 16 1 1 1 0 5 5").unwrap_err();
        assert!(matches!(err, TileMapError::InvalidValue { field: "tile count", .. }));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TileInfo.txt");
        assert!(matches!(load_tile_info(&path), Err(TileMapError::Io { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let map = load_tile_info(file.path()).unwrap();
        assert_eq!(map.width(), 3);
    }

    #[test]
    fn test_draw_one_call_per_valid_cell() {
        let map = TileMap::from_rows(floor_and_wall(), &[&[0, -1], &[1, 9]]);
        let tileset = TextureHandle {
            id: 1,
            width: 32,
            height: 16,
        };
        let mut canvas = RecordingCanvas::default();
        map.draw(&mut canvas, tileset);
        assert_eq!(canvas.textures.len(), 2);
        assert_eq!(canvas.textures[1].1, Rect::new(0.0, 16.0, 16.0, 16.0));

        let mut canvas = RecordingCanvas::default();
        map.draw(&mut canvas, TextureHandle::NULL);
        assert!(canvas.textures.is_empty());
    }
}
