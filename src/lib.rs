//! Frontline - deterministic area-of-responsibility assignment and bot command
//!
//! Splits each faction's territory into corps sectors, allocates front
//! regions to brigades, derives a contiguous unit-level assignment and
//! issues posture, reshape and attack orders for computer-controlled
//! factions. Identical input always yields byte-identical output.

pub mod aor;
pub mod bot;
pub mod core;
pub mod forces;
pub mod graph;
pub mod territory;
pub mod turn;

pub use crate::core::{EngineConfig, FrontError, Result};
pub use turn::{run_turn, TurnInput, TurnOutput};
