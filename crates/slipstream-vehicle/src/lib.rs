//! Player vehicle state machine for SLIPSTREAM.
//!
//! Turns per-tick sensor input (forward probe, contacts, fuel) and player
//! commands into speed, boost and survival state. No ECS dependency:
//! operates on plain data and talks to physics through
//! [`PhysicsBridge`](slipstream_core::physics::PhysicsBridge).

pub mod countdown;
pub mod vehicle;

pub use slipstream_core as core;
pub use vehicle::PlayerVehicle;
