//! Player commands delivered by the input collaborator.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::LaneDirection;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Shift one lane left. No-op at the left edge.
    MoveLeft,
    /// Shift one lane right. No-op at the right edge.
    MoveRight,
    /// Fire nitro. No-op unless the combo has unlocked it.
    ActivateNitro,
    /// Start a fresh run: full tank, centre lane, empty road.
    Restart,
}

impl PlayerCommand {
    /// Decode a horizontal input axis into a lane change. Zero is ignored.
    pub fn from_axis(x: f64) -> Option<PlayerCommand> {
        if x < 0.0 {
            Some(PlayerCommand::MoveLeft)
        } else if x > 0.0 {
            Some(PlayerCommand::MoveRight)
        } else {
            None
        }
    }

    /// Lane direction for lane-change commands.
    pub fn lane_direction(self) -> Option<LaneDirection> {
        match self {
            PlayerCommand::MoveLeft => Some(LaneDirection::Left),
            PlayerCommand::MoveRight => Some(LaneDirection::Right),
            _ => None,
        }
    }
}
