//! The player vehicle: lane position, slipstream detection, near-miss boost,
//! nitro, fuel and collision response.
//!
//! Per-tick order is fixed: fuel burn, slipstream probe, timers, speed law,
//! then position/roll smoothing. Later steps read what earlier steps wrote in
//! the same tick, never the reverse.
//!
//! `PlayerVehicle` exclusively owns its state. Other systems read the getters
//! or go through the command methods (`move_left`, `move_right`,
//! `activate_nitro`, `add_fuel`, `on_collision`).

use std::sync::Arc;

use glam::DVec3;
use tracing::{debug, info, warn};

use slipstream_core::config::{HandlingConfig, LaneLayout};
use slipstream_core::constants::{CRASH_SHAKE_INTENSITY, NITRO_SHAKE_INTENSITY, TILT_DEADZONE};
use slipstream_core::enums::{CollisionCategory, LaneDirection, VehicleState};
use slipstream_core::error::ConfigError;
use slipstream_core::events::GameEvent;
use slipstream_core::physics::{PhysicsBridge, FORWARD};
use slipstream_core::profile::VehicleProfile;
use slipstream_core::state::PlayerView;
use slipstream_core::types::{move_towards, smooth_towards, BodyId};

use crate::countdown::{advance_slot, Countdown};

/// The player vehicle state machine.
#[derive(Debug, Clone)]
pub struct PlayerVehicle {
    profile: Arc<VehicleProfile>,
    lanes: LaneLayout,
    handling: HandlingConfig,

    state: VehicleState,
    lane_index: usize,
    position: DVec3,
    roll_deg: f64,
    current_speed: f64,
    current_fuel: f64,
    /// Distance to the car ahead from this tick's probe. `Some` = slipstreaming.
    slipstream_hit: Option<f64>,
    boost: Option<Countdown>,
    combo: u32,
    recovery: Option<Countdown>,
    nitro: Option<Countdown>,
    /// Last nitro availability reported to the presentation layer.
    nitro_flag_reported: bool,
    distance: f64,
}

impl PlayerVehicle {
    /// Build a vehicle for a fresh run. Configuration errors are fatal.
    pub fn new(
        profile: Arc<VehicleProfile>,
        lanes: LaneLayout,
        handling: HandlingConfig,
    ) -> Result<Self, ConfigError> {
        profile.validate()?;
        lanes.validate()?;
        handling.validate()?;

        let start_x = lanes.offsets[lanes.start_lane];
        Ok(Self {
            state: VehicleState::Accelerating,
            lane_index: lanes.start_lane,
            position: DVec3::new(start_x, 0.0, 0.0),
            roll_deg: 0.0,
            current_speed: 0.0,
            current_fuel: profile.max_fuel,
            slipstream_hit: None,
            boost: None,
            combo: 0,
            recovery: None,
            nitro: None,
            nitro_flag_reported: false,
            distance: 0.0,
            profile,
            lanes,
            handling,
        })
    }

    /// Re-initialize for a new run: Accelerating, full tank, start lane, at rest.
    pub fn reset(&mut self) {
        let start_x = self.lanes.offsets[self.lanes.start_lane];
        self.state = VehicleState::Accelerating;
        self.lane_index = self.lanes.start_lane;
        self.position = DVec3::new(start_x, 0.0, 0.0);
        self.roll_deg = 0.0;
        self.current_speed = 0.0;
        self.current_fuel = self.profile.max_fuel;
        self.slipstream_hit = None;
        self.boost = None;
        self.combo = 0;
        self.recovery = None;
        self.nitro = None;
        self.nitro_flag_reported = false;
        self.distance = 0.0;
        info!("vehicle reset for a new run");
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance the vehicle by `dt` seconds.
    pub fn tick<P: PhysicsBridge + ?Sized>(
        &mut self,
        dt: f64,
        physics: &P,
        events: &mut Vec<GameEvent>,
    ) {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "ignoring tick with invalid delta time");
            return;
        }

        self.burn_fuel(dt, events);
        self.probe_slipstream(physics);
        self.advance_timers(dt);
        self.update_speed(dt);
        self.update_position(dt);
        self.distance += self.current_speed * dt;
        self.sync_nitro_flag(events);
    }

    fn burn_fuel(&mut self, dt: f64, events: &mut Vec<GameEvent>) {
        if self.state.is_terminal() {
            return;
        }
        self.current_fuel =
            (self.current_fuel - self.profile.fuel_consumption_rate * dt).clamp(0.0, self.profile.max_fuel);
        if self.current_fuel <= 0.0 {
            self.enter_out_of_fuel(events);
        }
    }

    fn probe_slipstream<P: PhysicsBridge + ?Sized>(&mut self, physics: &P) {
        self.slipstream_hit = if self.state == VehicleState::Accelerating {
            physics
                .probe_forward(
                    self.position,
                    FORWARD,
                    self.profile.slipstream_activation_distance,
                    CollisionCategory::OtherVehicle,
                )
                .filter(|d| d.is_finite() && *d <= self.profile.slipstream_activation_distance)
                .map(|d| d.max(0.0))
        } else {
            None
        };
    }

    fn advance_timers(&mut self, dt: f64) {
        if advance_slot(&mut self.boost, dt) {
            debug!(combo = self.combo, "near-miss boost expired, combo reset");
            self.combo = 0;
        }

        if advance_slot(&mut self.recovery, dt) && self.state == VehicleState::Decelerating {
            self.transition(VehicleState::Accelerating);
        }

        if advance_slot(&mut self.nitro, dt) && self.state == VehicleState::NitroBoosting {
            self.transition(VehicleState::Accelerating);
        }
    }

    fn update_speed(&mut self, dt: f64) {
        let p = &self.profile;
        let (target, rate) = match self.state {
            VehicleState::Accelerating => {
                let boost = if self.is_boosting() { p.boost_max_speed } else { 0.0 };
                (p.max_speed + boost, p.acceleration)
            }
            VehicleState::Decelerating => (0.0, p.deceleration_after_crash),
            VehicleState::OutOfFuel => (0.0, p.acceleration),
            VehicleState::NitroBoosting => (
                p.max_speed + p.boost_max_speed + p.nitro_boost_speed,
                p.acceleration,
            ),
        };
        self.current_speed = move_towards(self.current_speed, target, rate * dt).max(0.0);
    }

    fn update_position(&mut self, dt: f64) {
        let target_x = self.lanes.offsets[self.lane_index];
        self.position.x =
            smooth_towards(self.position.x, target_x, self.handling.lane_change_speed, dt);

        let dx = target_x - self.position.x;
        let target_roll = if dx.abs() > TILT_DEADZONE {
            -dx.signum() * self.handling.tilt_angle_deg
        } else {
            0.0
        };
        self.roll_deg = smooth_towards(self.roll_deg, target_roll, self.handling.tilt_speed, dt);
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn move_left(&mut self, events: &mut Vec<GameEvent>) -> bool {
        self.change_lane(LaneDirection::Left, events)
    }

    pub fn move_right(&mut self, events: &mut Vec<GameEvent>) -> bool {
        self.change_lane(LaneDirection::Right, events)
    }

    /// Shift one lane. Returns `false` (no-op) at the track edge or once out of fuel.
    ///
    /// A lane change made while slipstreaming pays out a near-miss boost.
    pub fn change_lane(&mut self, direction: LaneDirection, events: &mut Vec<GameEvent>) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let Some(next) = self
            .lane_index
            .checked_add_signed(direction.step())
            .filter(|&lane| lane < self.lanes.count())
        else {
            return false;
        };
        self.lane_index = next;

        if let Some(hit_distance) = self.slipstream_hit.take() {
            self.award_near_miss(hit_distance, events);
        }
        true
    }

    fn award_near_miss(&mut self, hit_distance: f64, events: &mut Vec<GameEvent>) {
        let bonus = self.profile.near_miss_bonus(hit_distance);
        match &mut self.boost {
            Some(timer) => timer.extend(bonus),
            None => self.boost = Some(Countdown::new(bonus)),
        }
        self.combo = self.combo.saturating_add(1);
        debug!(
            hit_distance,
            bonus,
            combo = self.combo,
            remaining = self.boost_time_remaining(),
            "near miss"
        );
        events.push(GameEvent::NearMiss {
            bonus_secs: bonus,
            combo: self.combo,
        });
        self.sync_nitro_flag(events);
    }

    /// Fire nitro. Returns `false` (no-op) unless the combo has unlocked it.
    pub fn activate_nitro(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if !self.nitro_available() {
            debug!(combo = self.combo, state = ?self.state, "nitro requested but not available");
            return false;
        }
        self.combo = 0;
        self.slipstream_hit = None;
        self.nitro = Some(Countdown::new(self.profile.nitro_boost_duration));
        self.transition(VehicleState::NitroBoosting);
        events.push(GameEvent::NitroActivated);
        self.sync_nitro_flag(events);
        true
    }

    /// Refuel from a pickup, clamped to the tank. No effect once out of fuel.
    pub fn add_fuel(&mut self, amount: f64) {
        if self.state.is_terminal() {
            return;
        }
        if !amount.is_finite() || amount < 0.0 {
            warn!(amount, "ignoring invalid fuel amount");
            return;
        }
        self.current_fuel = (self.current_fuel + amount).min(self.profile.max_fuel);
    }

    /// React to a reported contact with an obstacle-tagged body.
    pub fn on_collision<P: PhysicsBridge + ?Sized>(
        &mut self,
        other: BodyId,
        contact_point: DVec3,
        physics: &mut P,
        events: &mut Vec<GameEvent>,
    ) {
        match self.state {
            VehicleState::OutOfFuel => {}
            VehicleState::NitroBoosting => {
                let direction = (self.outward(contact_point) + DVec3::Y).normalize();
                physics.apply_impulse(
                    other,
                    direction * self.profile.nitro_collision_force,
                    contact_point,
                );
                events.push(GameEvent::CameraShake {
                    intensity: NITRO_SHAKE_INTENSITY,
                });
                debug!(body = other.0, "nitro smashed through body");
            }
            VehicleState::Accelerating | VehicleState::Decelerating => {
                self.combo = 0;
                self.boost = None;
                self.slipstream_hit = None;
                self.recovery = Some(Countdown::new(self.handling.impact_recovery_secs));
                self.transition(VehicleState::Decelerating);

                let knock = self.outward(contact_point) + DVec3::Y * self.handling.knockback_up_bias;
                physics.apply_impulse(
                    other,
                    knock.normalize_or_zero() * self.handling.knockback_force,
                    contact_point,
                );
                events.push(GameEvent::CameraShake {
                    intensity: CRASH_SHAKE_INTENSITY,
                });
                self.sync_nitro_flag(events);
            }
        }
    }

    /// Horizontal unit vector from the car toward `point`; straight ahead if degenerate.
    fn outward(&self, point: DVec3) -> DVec3 {
        let mut separation = point - self.position;
        separation.y = 0.0;
        separation.try_normalize().unwrap_or(FORWARD)
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn enter_out_of_fuel(&mut self, events: &mut Vec<GameEvent>) {
        self.current_fuel = 0.0;
        self.boost = None;
        self.recovery = None;
        self.nitro = None;
        self.slipstream_hit = None;
        self.combo = 0;
        self.transition(VehicleState::OutOfFuel);
        info!(distance = self.distance, "out of fuel, run over");
        events.push(GameEvent::GameOver {
            distance: self.distance,
        });
    }

    fn transition(&mut self, next: VehicleState) {
        if self.state == next || self.state.is_terminal() {
            return;
        }
        debug!(from = ?self.state, to = ?next, speed = self.current_speed, "vehicle state change");
        self.state = next;
    }

    /// Emit `NitroAvailable` when the capability flag flips.
    fn sync_nitro_flag(&mut self, events: &mut Vec<GameEvent>) {
        let available = self.nitro_available();
        if available != self.nitro_flag_reported {
            self.nitro_flag_reported = available;
            events.push(GameEvent::NitroAvailable { available });
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn profile(&self) -> &Arc<VehicleProfile> {
        &self.profile
    }

    pub fn lanes(&self) -> &LaneLayout {
        &self.lanes
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn lane_index(&self) -> usize {
        self.lane_index
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn roll_deg(&self) -> f64 {
        self.roll_deg
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn current_fuel(&self) -> f64 {
        self.current_fuel
    }

    pub fn max_fuel(&self) -> f64 {
        self.profile.max_fuel
    }

    pub fn is_slipstreaming(&self) -> bool {
        self.slipstream_hit.is_some()
    }

    /// Distance reported by this tick's probe, if slipstreaming.
    pub fn slipstream_distance(&self) -> Option<f64> {
        self.slipstream_hit
    }

    pub fn is_boosting(&self) -> bool {
        self.boost.is_some()
    }

    pub fn boost_time_remaining(&self) -> f64 {
        self.boost.map_or(0.0, |timer| timer.remaining())
    }

    pub fn combo_count(&self) -> u32 {
        self.combo
    }

    pub fn is_nitro_boosting(&self) -> bool {
        self.state == VehicleState::NitroBoosting
    }

    /// Capability flag: combo has reached the requirement and nitro can fire.
    pub fn nitro_available(&self) -> bool {
        self.state == VehicleState::Accelerating
            && self.combo >= self.profile.nitro_combo_requirement
    }

    /// Speed bonus traffic ramps toward while the player is boosted.
    ///
    /// A running near-miss boost takes precedence and yields `boost_max_speed`;
    /// nitro alone yields `nitro_boost_speed`.
    pub fn boost_surplus(&self) -> Option<f64> {
        let p = &self.profile;
        if self.state.is_terminal() {
            None
        } else if self.is_boosting() {
            Some(p.boost_max_speed)
        } else if self.state == VehicleState::NitroBoosting {
            Some(p.nitro_boost_speed)
        } else {
            None
        }
    }

    /// Distance driven this run.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// HUD view of the current state.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            state: self.state,
            lane: self.lane_index,
            position: self.position,
            roll_deg: self.roll_deg,
            speed: self.current_speed,
            fuel: self.current_fuel,
            max_fuel: self.profile.max_fuel,
            fuel_fraction: self.current_fuel / self.profile.max_fuel,
            slipstreaming: self.is_slipstreaming(),
            boosting: self.is_boosting(),
            boost_remaining_secs: self.boost_time_remaining(),
            combo: self.combo,
            nitro_available: self.nitro_available(),
            distance: self.distance,
        }
    }
}
