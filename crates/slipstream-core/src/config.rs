//! Run configuration: everything the composition root needs to build a
//! vehicle, a spawner and a pool.
//!
//! Every section has a `Default`, so a partial JSON document is accepted.
//! `GameConfig::validate` is the single gate: anything it rejects is fatal.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::TrafficTemplate;
use crate::error::ConfigError;
use crate::profile::{non_negative, positive, VehicleProfile};

/// Top-level configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub profile: VehicleProfile,
    pub lanes: LaneLayout,
    pub handling: HandlingConfig,
    pub spawner: SpawnerConfig,
    pub pool: PoolConfig,
    /// RNG seed. Same seed and inputs replay the same run.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            profile: VehicleProfile::default(),
            lanes: LaneLayout::default(),
            handling: HandlingConfig::default(),
            spawner: SpawnerConfig::default(),
            pool: PoolConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Parse and validate from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()?;
        self.lanes.validate()?;
        self.handling.validate()?;
        self.spawner.validate(self.lanes.count())?;
        self.pool.validate()?;
        Ok(())
    }
}

/// Ordered lane x-offsets and the starting lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaneLayout {
    /// Lane centre x-offsets, left to right (meters).
    pub offsets: Vec<f64>,
    /// Lane the car starts each run in.
    pub start_lane: usize,
    /// Lateral tolerance for matching bodies to a lane (meters).
    pub half_width: f64,
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            offsets: DEFAULT_LANES.to_vec(),
            start_lane: DEFAULT_START_LANE,
            half_width: DEFAULT_LANE_HALF_WIDTH,
        }
    }
}

impl LaneLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.offsets.is_empty() {
            return Err(ConfigError::EmptyLaneTable);
        }
        if self.start_lane >= self.offsets.len() {
            return Err(ConfigError::StartLaneOutOfRange {
                start: self.start_lane,
                count: self.offsets.len(),
            });
        }
        positive("lanes.halfWidth", self.half_width)
    }

    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// X-offset of a lane, if it exists.
    pub fn offset(&self, lane: usize) -> Option<f64> {
        self.offsets.get(lane).copied()
    }
}

/// Handling and crash-response tuning not carried by the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlingConfig {
    /// Lateral smoothing rate toward the lane centre (1/s).
    pub lane_change_speed: f64,
    /// Maximum roll while changing lanes (degrees).
    pub tilt_angle_deg: f64,
    /// Roll smoothing rate (1/s).
    pub tilt_speed: f64,
    /// Time spent decelerating after a crash (s).
    pub impact_recovery_secs: f64,
    /// Impulse applied to a body hit outside of nitro.
    pub knockback_force: f64,
    /// Upward component of the knockback direction.
    pub knockback_up_bias: f64,
}

impl Default for HandlingConfig {
    fn default() -> Self {
        Self {
            lane_change_speed: LANE_CHANGE_SPEED,
            tilt_angle_deg: TILT_ANGLE_DEG,
            tilt_speed: TILT_SPEED,
            impact_recovery_secs: IMPACT_RECOVERY_SECS,
            knockback_force: KNOCKBACK_FORCE,
            knockback_up_bias: KNOCKBACK_UP_BIAS,
        }
    }
}

impl HandlingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("handling.laneChangeSpeed", self.lane_change_speed)?;
        non_negative("handling.tiltAngleDeg", self.tilt_angle_deg)?;
        positive("handling.tiltSpeed", self.tilt_speed)?;
        non_negative("handling.impactRecoverySecs", self.impact_recovery_secs)?;
        non_negative("handling.knockbackForce", self.knockback_force)?;
        non_negative("handling.knockbackUpBias", self.knockback_up_bias)
    }
}

/// One timed sub-spawn of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStep {
    /// Lane index to spawn in.
    pub lane: usize,
    /// Wait after the previous step (seconds).
    pub delay: f64,
    /// Fixed template, or a random one when `None`.
    #[serde(default)]
    pub template: Option<TrafficTemplate>,
}

/// An ordered sequence of timed sub-spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePattern {
    pub name: String,
    pub steps: Vec<PatternStep>,
}

impl ObstaclePattern {
    /// Built-in patterns for three lanes.
    pub fn defaults() -> Vec<ObstaclePattern> {
        let step = |lane, delay| PatternStep {
            lane,
            delay,
            template: None,
        };
        vec![
            ObstaclePattern {
                name: "wall-gap-left".into(),
                steps: vec![step(1, 0.0), step(2, 0.0)],
            },
            ObstaclePattern {
                name: "wall-gap-right".into(),
                steps: vec![step(0, 0.0), step(1, 0.0)],
            },
            ObstaclePattern {
                name: "zigzag".into(),
                steps: vec![step(0, 0.0), step(1, 0.6), step(2, 0.6), step(1, 0.6)],
            },
            ObstaclePattern {
                name: "convoy".into(),
                steps: vec![
                    PatternStep {
                        lane: 1,
                        delay: 0.0,
                        template: Some(TrafficTemplate::Truck),
                    },
                    step(1, 0.8),
                    step(1, 0.8),
                ],
            },
        ]
    }
}

/// Traffic spawner timing and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnerConfig {
    pub min_interval: f64,
    pub max_interval: f64,
    /// Accumulated interval after which the next spawn is a fuel pickup.
    pub fuel_interval: f64,
    /// Spawn distance ahead of the player (meters).
    pub spawn_z: f64,
    pub min_traffic_speed: f64,
    pub max_traffic_speed: f64,
    pub templates: Vec<TrafficTemplate>,
    pub patterns: Vec<ObstaclePattern>,
    /// Probability in `[0, 1]` that a due spawn plays a pattern instead.
    pub pattern_chance: f64,
    pub fuel_amount: f64,
    pub pickup_spin_deg_per_sec: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            min_interval: MIN_SPAWN_INTERVAL,
            max_interval: MAX_SPAWN_INTERVAL,
            fuel_interval: FUEL_SPAWN_INTERVAL,
            spawn_z: SPAWN_Z,
            min_traffic_speed: MIN_TRAFFIC_SPEED,
            max_traffic_speed: MAX_TRAFFIC_SPEED,
            templates: TrafficTemplate::ALL.to_vec(),
            patterns: ObstaclePattern::defaults(),
            pattern_chance: PATTERN_CHANCE,
            fuel_amount: FUEL_PICKUP_AMOUNT,
            pickup_spin_deg_per_sec: PICKUP_SPIN_DEG_PER_SEC,
        }
    }
}

impl SpawnerConfig {
    /// Check ranges, and that every pattern step indexes one of `lane_count` lanes.
    pub fn validate(&self, lane_count: usize) -> Result<(), ConfigError> {
        positive("spawner.minInterval", self.min_interval)?;
        ordered("spawner.interval", self.min_interval, self.max_interval)?;
        positive("spawner.fuelInterval", self.fuel_interval)?;
        positive("spawner.spawnZ", self.spawn_z)?;
        non_negative("spawner.minTrafficSpeed", self.min_traffic_speed)?;
        ordered(
            "spawner.trafficSpeed",
            self.min_traffic_speed,
            self.max_traffic_speed,
        )?;
        if self.templates.is_empty() {
            return Err(ConfigError::NoTemplates);
        }
        if !(0.0..=1.0).contains(&self.pattern_chance) {
            return Err(ConfigError::InvalidField {
                field: "spawner.patternChance",
                value: self.pattern_chance,
                reason: "must be within [0, 1]",
            });
        }
        for pattern in &self.patterns {
            for step in &pattern.steps {
                non_negative("spawner.patterns.delay", step.delay)?;
                if step.lane >= lane_count {
                    return Err(ConfigError::PatternLaneOutOfRange {
                        pattern: pattern.name.clone(),
                        lane: step.lane,
                        count: lane_count,
                    });
                }
            }
        }
        non_negative("spawner.fuelAmount", self.fuel_amount)
    }
}

/// Entity pool capacity policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    /// Free-list capacity reserved per template.
    pub default_capacity: usize,
    /// Parked instances kept per template; extras are destroyed on release.
    pub max_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            default_capacity: POOL_DEFAULT_CAPACITY,
            max_size: POOL_MAX_SIZE,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size > POOL_SIZE_LIMIT || self.default_capacity > self.max_size {
            return Err(ConfigError::PoolSize {
                default_capacity: self.default_capacity,
                max_size: self.max_size,
                limit: POOL_SIZE_LIMIT,
            });
        }
        Ok(())
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
