//! Territory analysis: control, front line, topology and corps sectors

pub mod control;
pub mod front;
pub mod sectors;
pub mod topology;

pub use control::ControlSnapshot;
pub use front::{expand_front, front_active_units};
pub use sectors::{front_walk_order, nearest_sector, partition_corps_sectors, CorpsSectors};
pub use topology::{analyze_territory, TerritoryTopology};
