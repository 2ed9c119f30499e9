//! Simulation constants and tuning parameters.

/// Nominal frame rate the host drives the level at (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame at the nominal rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Tolerance for countdown timers so that `n * dt` reaching the duration
/// is not lost to float rounding.
pub const TIMER_EPSILON: f32 = 1e-4;

// --- Arena ---

/// Fallback arena width when no tile map is loaded (pixels).
pub const ARENA_WIDTH: f32 = 800.0;

/// Fallback arena height when no tile map is loaded (pixels).
pub const ARENA_HEIGHT: f32 = 600.0;

/// Host window size used for the camera offset.
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 720.0;

// --- Tile map ---

/// Edge length of one map cell in world pixels.
pub const TILE_SIZE: f32 = 16.0;

/// Maximum map width/height in cells.
pub const MAX_MAP_DIMENSION: usize = 100;

/// Maximum number of enemy spawn points a map may name.
pub const MAX_ENEMY_SPAWNS: usize = 3;

// --- Player ---

pub const PLAYER_RADIUS: f32 = 35.0;
pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_MAX_HEALTH: i32 = 70;

/// Grace period after the player takes any damage (seconds).
pub const PLAYER_HIT_COOLDOWN_SECS: f32 = 1.0;

/// Minimum time between player shots (seconds).
pub const PLAYER_SHOOT_COOLDOWN_SECS: f32 = 0.5;

// --- Projectiles ---

pub const PLAYER_BULLET_SPEED: f32 = 600.0;
pub const PLAYER_BULLET_RADIUS: f32 = 25.0;
pub const PLAYER_BULLET_DAMAGE: i32 = 10;

pub const BEE_BULLET_SPEED: f32 = 300.0;
pub const BEE_BULLET_RADIUS: f32 = 10.0;
pub const BEE_BULLET_DAMAGE: i32 = 10;

// --- Enemy behavior ---

/// Shortest and longest wander heading hold (whole seconds).
pub const WANDER_COOLDOWN_MIN_SECS: u32 = 1;
pub const WANDER_COOLDOWN_MAX_SECS: u32 = 3;

/// Wandering moves at this fraction of the chase speed.
pub const WANDER_SPEED_FACTOR: f32 = 0.5;

/// Re-rolled wander headings shorter than this (before normalizing) are rejected.
pub const WANDER_MIN_HEADING_LENGTH: f32 = 0.1;

/// Wind-up time between stopping in range and lunging (seconds).
pub const READY_DURATION_SECS: f32 = 1.0;

/// Magnitude of the one-shot lunge impulse applied on entering Attacking.
pub const LUNGE_ACCELERATION: f32 = 1000.0;

/// Exponential damping factor for the lunge (`v -= v * k * dt`).
pub const LUNGE_DAMPING: f32 = 5.0;

/// The lunge ends once speed decays below this.
pub const LUNGE_EXIT_SPEED: f32 = 50.0;

/// Invulnerability window after an enemy is hit (seconds).
pub const ENEMY_HIT_INVULNERABILITY_SECS: f32 = 0.1;

/// Visibility toggle period while an enemy flashes after a hit (seconds).
pub const ENEMY_FLASH_INTERVAL_SECS: f32 = 0.1;

// --- Archetype extensions ---

/// Full ghost phasing cycle length (seconds).
pub const GHOST_PHASE_PERIOD_SECS: f32 = 10.0;

/// The ghost is phased out while its cycle timer is at or below this.
pub const GHOST_PHASED_BELOW_SECS: f32 = 5.0;

/// Bee patrol waypoints.
pub const BEE_WAYPOINT_A: (f32, f32) = (100.0, 100.0);
pub const BEE_WAYPOINT_B: (f32, f32) = (600.0, 400.0);

/// Distance at which a bee counts as having reached its waypoint.
pub const BEE_ARRIVAL_DISTANCE: f32 = 10.0;

/// Minimum time between bee shots (seconds).
pub const BEE_FIRE_COOLDOWN_SECS: f32 = 5.0;

// --- Waves ---

/// Budget offset: `budget = base + wave * increment`.
pub const WAVE_BASE_POINTS: u32 = 0;
pub const WAVE_POINTS_PER_LEVEL: u32 = 10;

/// Time between spawn attempts within a wave (seconds).
pub const WAVE_SPAWN_INTERVAL_SECS: f32 = 1.0;

/// Pause between a cleared wave and the next one (seconds).
pub const WAVE_COOLDOWN_SECS: f32 = 3.0;

/// Random archetype draws per spawn attempt before falling back.
pub const WAVE_MAX_SPAWN_ATTEMPTS: u32 = 8;

/// Default last wave; clearing it wins the level.
pub const DEFAULT_FINAL_WAVE: u32 = 10;

// --- Camera ---

/// Side of the square tracking window around the player (pixels).
pub const CAMERA_WINDOW_SIZE: f32 = 300.0;

/// Largest per-frame nudge toward the player while inside the window.
pub const CAMERA_DRIFT: f32 = 0.5;
