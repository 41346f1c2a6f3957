//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Persistent scheduling state, such as the spawner's timers, is passed in.

pub mod pickups;
pub mod snapshot;
pub mod spawner;
pub mod traffic;
