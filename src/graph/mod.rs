//! Unit adjacency, regions and the shared breadth-first search

pub mod adjacency;
pub mod search;

pub use adjacency::{AdjacencyGraph, RegionIndex, Theater};
pub use search::{connected_components, label_from_seeds, reachable_from, Claim};
