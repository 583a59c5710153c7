pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, AllocationConfig, EngineConfig, PolicyConfig, ScoringConfig};
pub use error::{FrontError, Result};
pub use types::{adjacency_key, Edge, FactionId, FormationId, RegionId, Turn, UnitId};
