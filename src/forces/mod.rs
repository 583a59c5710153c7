//! Order of battle: formations and the roster that holds them

pub mod formation;
pub mod roster;

pub use formation::{Formation, FormationKind, FormationStatus, Posture, Readiness};
pub use roster::Roster;
