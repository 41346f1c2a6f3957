//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz) used by the headless game loop.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Lanes ---

/// Default lane x-offsets (meters), left to right.
pub const DEFAULT_LANES: [f64; 3] = [-2.5, 0.0, 2.5];

/// Default starting lane (centre).
pub const DEFAULT_START_LANE: usize = 1;

/// Lateral tolerance when the forward probe matches a body to the player's lane.
pub const DEFAULT_LANE_HALF_WIDTH: f64 = 1.0;

// --- Handling ---

/// Exponential smoothing rate of the lateral lane change (1/s).
pub const LANE_CHANGE_SPEED: f64 = 15.0;

/// Maximum roll while changing lanes (degrees).
pub const TILT_ANGLE_DEG: f64 = 15.0;

/// Exponential smoothing rate of the roll (1/s).
pub const TILT_SPEED: f64 = 10.0;

/// Lateral error below which the car counts as settled in its lane.
pub const TILT_DEADZONE: f64 = 0.05;

/// Time spent in Decelerating after a crash before recovering (seconds).
pub const IMPACT_RECOVERY_SECS: f64 = 1.0;

/// Impulse magnitude applied to a body hit outside of nitro.
pub const KNOCKBACK_FORCE: f64 = 12.0;

/// Upward component added to the knockback direction.
pub const KNOCKBACK_UP_BIAS: f64 = 0.5;

/// Camera shake intensity reported for an ordinary crash.
pub const CRASH_SHAKE_INTENSITY: f64 = 1.0;

/// Camera shake intensity reported when nitro smashes through a body.
pub const NITRO_SHAKE_INTENSITY: f64 = 0.4;

// --- Traffic ---

/// Distance behind the player after which traffic is retired (meters).
pub const DESPAWN_MARGIN: f64 = 20.0;

/// Z position at which traffic and pickups spawn (meters ahead of the player).
pub const SPAWN_Z: f64 = 100.0;

/// Spawn interval range (seconds).
pub const MIN_SPAWN_INTERVAL: f64 = 1.0;
pub const MAX_SPAWN_INTERVAL: f64 = 3.0;

/// Accumulated spawn time after which a fuel pickup replaces an obstacle (seconds).
pub const FUEL_SPAWN_INTERVAL: f64 = 10.0;

/// Traffic base speed range (m/s).
pub const MIN_TRAFFIC_SPEED: f64 = 10.0;
pub const MAX_TRAFFIC_SPEED: f64 = 18.0;

/// Chance that a due spawn expands into a pattern instead of a single entity.
pub const PATTERN_CHANCE: f64 = 0.25;

/// Half the player car's length, used when testing overlap with traffic (meters).
pub const PLAYER_HALF_LENGTH: f64 = 2.25;

// --- Fuel pickups ---

/// Distance along z within which the player collects a pickup (meters).
pub const PICKUP_TRIGGER_RADIUS: f64 = 1.5;

/// Fuel restored by one pickup.
pub const FUEL_PICKUP_AMOUNT: f64 = 10.0;

/// Pickup spin rate (degrees per second).
pub const PICKUP_SPIN_DEG_PER_SEC: f64 = 50.0;

// --- Pool ---

/// Initial free-list capacity per template.
pub const POOL_DEFAULT_CAPACITY: usize = 10;

/// Parked instances kept per template before extras are destroyed.
pub const POOL_MAX_SIZE: usize = 100;

/// Upper bound accepted for either pool size setting.
pub const POOL_SIZE_LIMIT: usize = 10_000;

// --- Run ---

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;
