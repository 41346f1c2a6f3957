//! Simulation engine for SLIPSTREAM.
//!
//! Owns the hecs ECS world, the traffic pool and spawner, drives the player
//! vehicle, and produces `GameSnapshot`s for the presentation layer.

pub mod engine;
pub mod lane_physics;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use slipstream_core as core;

#[cfg(test)]
mod tests;
