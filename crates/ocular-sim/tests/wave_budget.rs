//! Wave economy: budgets are spent exactly and never overdrawn.

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ocular_core::events::LevelEvent;
use ocular_enemy_ai::profiles::get_profile;
use ocular_sim::systems::wave_director::{run_spawning, WaveConfig, WaveDirector};

fn director(base_points: u32, points_per_wave: u32) -> WaveDirector {
    WaveDirector::new(
        WaveConfig {
            base_points,
            points_per_wave,
            ..Default::default()
        },
        vec![Vec2::new(0.0, 300.0), Vec2::new(800.0, 300.0)],
    )
}

#[test]
fn budget_grows_linearly() {
    let director = director(5, 3);
    assert_eq!(director.budget_for(1), 8);
    assert_eq!(director.budget_for(4), 17);
}

#[test]
fn budget_saturates_on_huge_wave_numbers() {
    let mut director = director(5, 3);
    assert_eq!(director.budget_for(u32::MAX), u32::MAX);
    assert_eq!(director.start_wave(u32::MAX), u32::MAX);
    assert_eq!(director.remaining(), u32::MAX);
}

#[test]
fn wave_budget_is_spent_exactly() {
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut director = director(5, 3);
        let budget = director.start_wave(1);
        assert_eq!(budget, 8);

        let mut spent = 0;
        while let Some((archetype, point)) = director.pick_spawn(&mut rng) {
            spent += get_profile(archetype).cost;
            assert!(spent <= budget, "seed {seed} overspent: {spent} > {budget}");
            assert!(point == Vec2::new(0.0, 300.0) || point == Vec2::new(800.0, 300.0));
        }
        assert_eq!(spent, budget, "seed {seed} left points unspent");
        assert_eq!(director.remaining(), 0);
        assert!(director.is_exhausted());
    }
}

#[test]
fn no_spawn_points_closes_the_budget() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut director = WaveDirector::new(WaveConfig::default(), Vec::new());
    director.start_wave(2);
    assert!(director.pick_spawn(&mut rng).is_none());
    assert_eq!(director.remaining(), 0);
}

#[test]
fn spawns_follow_the_interval() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut director = director(0, 10);
    let mut events = Vec::new();
    director.start_wave(1);

    // First attempt is immediate, then one per second.
    for _ in 0..8 {
        run_spawning(&mut world, &mut rng, &mut director, 0.25, &mut events);
    }
    let spawned = events
        .iter()
        .filter(|e| matches!(e, LevelEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
    assert_eq!(world.len(), 2);
}

#[test]
fn arena_edges_are_the_fallback_spawn_points() {
    let arena = ocular_core::types::Rect::new(0.0, 0.0, 800.0, 600.0);
    let points = WaveDirector::spawn_points_for(&[], arena);
    assert_eq!(points.len(), 4);
    assert!(points.contains(&Vec2::new(0.0, 300.0)));
    assert!(points.contains(&Vec2::new(400.0, 600.0)));

    let named = [Vec2::new(10.0, 10.0)];
    assert_eq!(WaveDirector::spawn_points_for(&named, arena), named.to_vec());
}
