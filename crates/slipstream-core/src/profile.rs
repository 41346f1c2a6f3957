//! Vehicle performance and reward tuning.
//!
//! A `VehicleProfile` is created once at configuration load, validated,
//! and shared read-only (behind an `Arc`) by every consumer.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable performance/reward parameters for the player vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleProfile {
    /// Cruising top speed (m/s).
    pub max_speed: f64,
    /// Rate at which speed approaches its target while driving (m/s²).
    pub acceleration: f64,
    /// Rate at which speed drops to zero after a crash (m/s²).
    pub deceleration_after_crash: f64,
    /// Forward probe range for slipstream detection (m).
    pub slipstream_activation_distance: f64,
    /// Near-miss boost time awarded regardless of distance (s).
    pub boost_base_duration: f64,
    /// Extra near-miss boost time at zero distance (s).
    pub boost_bonus_duration: f64,
    /// Speed added on top of `max_speed` while boosting (m/s).
    pub boost_max_speed: f64,
    /// Tank capacity.
    pub max_fuel: f64,
    /// Fuel burned per second while running.
    pub fuel_consumption_rate: f64,
    /// Near-miss combo needed to unlock nitro.
    pub nitro_combo_requirement: u32,
    /// Nitro duration (s).
    pub nitro_boost_duration: f64,
    /// Speed added on top of max + boost speed during nitro (m/s).
    pub nitro_boost_speed: f64,
    /// Impulse magnitude applied to bodies hit during nitro.
    pub nitro_collision_force: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            max_speed: 100.0,
            acceleration: 15.0,
            deceleration_after_crash: 25.0,
            slipstream_activation_distance: 15.0,
            boost_base_duration: 1.0,
            boost_bonus_duration: 0.5,
            boost_max_speed: 30.0,
            max_fuel: 100.0,
            fuel_consumption_rate: 1.0,
            nitro_combo_requirement: 3,
            nitro_boost_duration: 3.0,
            nitro_boost_speed: 40.0,
            nitro_collision_force: 30.0,
        }
    }
}

impl VehicleProfile {
    /// Parse and validate a profile from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let profile: VehicleProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("maxSpeed", self.max_speed)?;
        positive("acceleration", self.acceleration)?;
        positive("decelerationAfterCrash", self.deceleration_after_crash)?;
        positive(
            "slipstreamActivationDistance",
            self.slipstream_activation_distance,
        )?;
        positive("boostBaseDuration", self.boost_base_duration)?;
        non_negative("boostBonusDuration", self.boost_bonus_duration)?;
        non_negative("boostMaxSpeed", self.boost_max_speed)?;
        positive("maxFuel", self.max_fuel)?;
        non_negative("fuelConsumptionRate", self.fuel_consumption_rate)?;
        if self.nitro_combo_requirement == 0 {
            return Err(ConfigError::InvalidField {
                field: "nitroComboRequirement",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        non_negative("nitroBoostDuration", self.nitro_boost_duration)?;
        non_negative("nitroBoostSpeed", self.nitro_boost_speed)?;
        non_negative("nitroCollisionForce", self.nitro_collision_force)?;
        Ok(())
    }

    /// Near-miss bonus for a probe hit at `hit_distance`.
    ///
    /// `base + bonus * f`, `f = clamp01((activation - hit) / activation)`:
    /// 1.0 at distance 0, 0.0 at the activation threshold.
    pub fn near_miss_bonus(&self, hit_distance: f64) -> f64 {
        let activation = self.slipstream_activation_distance;
        let f = ((activation - hit_distance) / activation).clamp(0.0, 1.0);
        self.boost_base_duration + self.boost_bonus_duration * f
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidField {
            field,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidField {
            field,
            value,
            reason: "must be finite and non-negative",
        })
    }
}
