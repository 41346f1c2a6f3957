//! Core types and definitions for the SLIPSTREAM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the vehicle profile, configuration, commands, events, state snapshots,
//! the physics collaborator contract, and constants.
//! It has no dependency on any ECS or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod physics;
pub mod profile;
pub mod state;
pub mod types;
