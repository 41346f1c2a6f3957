//! Autopilot input source.
//!
//! Reads each snapshot and decides at most one command: fire nitro when it
//! is available, dodge into a clear neighbouring lane while slipstreaming or
//! when a car is close ahead, and otherwise steer toward the nearest pickup.
//! A cooldown between lane changes lets the car settle into its new lane.

use slipstream_core::commands::PlayerCommand;
use slipstream_core::config::LaneLayout;
use slipstream_core::state::GameSnapshot;

/// Ticks to wait after a lane change before the next one.
const LANE_CHANGE_COOLDOWN_TICKS: u32 = 15;

/// A target lane must be free of traffic from this far behind the player...
const CLEAR_BEHIND: f64 = 4.0;
/// ...to this far ahead (meters).
const CLEAR_AHEAD: f64 = 12.0;

/// A car this close ahead in the player's lane forces a dodge (meters).
const DODGE_DISTANCE: f64 = 8.0;

pub struct Autopilot {
    lanes: LaneLayout,
    cooldown: u32,
}

impl Autopilot {
    pub fn new(lanes: LaneLayout) -> Self {
        Self { lanes, cooldown: 0 }
    }

    /// Decide the command to queue after `snapshot`, if any.
    pub fn decide(&mut self, snapshot: &GameSnapshot) -> Option<PlayerCommand> {
        let player = &snapshot.player;
        if player.state.is_terminal() {
            return None;
        }
        if player.nitro_available {
            return Some(PlayerCommand::ActivateNitro);
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        let z = player.position.z;
        let command = if player.slipstreaming || self.car_ahead(snapshot, player.lane, z) {
            self.clear_neighbour(snapshot, player.lane, z)
        } else {
            self.toward_pickup(snapshot, player.lane, z)
        };
        if command.is_some() {
            self.cooldown = LANE_CHANGE_COOLDOWN_TICKS;
        }
        command
    }

    /// Index of the lane whose centre is nearest to `x`.
    fn lane_of(&self, x: f64) -> usize {
        self.lanes
            .offsets
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
            .map_or(0, |(lane, _)| lane)
    }

    fn lane_clear(&self, snapshot: &GameSnapshot, lane: usize, z: f64) -> bool {
        !snapshot.traffic.iter().any(|car| {
            self.lane_of(car.position.x) == lane
                && car.position.z >= z - CLEAR_BEHIND
                && car.position.z <= z + CLEAR_AHEAD
        })
    }

    fn car_ahead(&self, snapshot: &GameSnapshot, lane: usize, z: f64) -> bool {
        snapshot.traffic.iter().any(|car| {
            self.lane_of(car.position.x) == lane
                && car.position.z > z
                && car.position.z <= z + DODGE_DISTANCE
        })
    }

    fn clear_neighbour(&self, snapshot: &GameSnapshot, lane: usize, z: f64) -> Option<PlayerCommand> {
        if lane > 0 && self.lane_clear(snapshot, lane - 1, z) {
            Some(PlayerCommand::MoveLeft)
        } else if lane + 1 < self.lanes.count() && self.lane_clear(snapshot, lane + 1, z) {
            Some(PlayerCommand::MoveRight)
        } else {
            None
        }
    }

    fn toward_pickup(&self, snapshot: &GameSnapshot, lane: usize, z: f64) -> Option<PlayerCommand> {
        let target = snapshot
            .pickups
            .iter()
            .filter(|pickup| pickup.position.z > z)
            .min_by(|a, b| a.position.z.total_cmp(&b.position.z))
            .map(|pickup| self.lane_of(pickup.position.x))?;

        let (command, next) = if target < lane {
            (PlayerCommand::MoveLeft, lane - 1)
        } else if target > lane {
            (PlayerCommand::MoveRight, lane + 1)
        } else {
            return None;
        };
        self.lane_clear(snapshot, next, z).then_some(command)
    }
}
