//! Per-faction strategy profiles
//!
//! A profile carries the faction's strategic-region tables and the knobs
//! that shape how aggressively its brigades switch to offensive postures.
//! Profiles are loaded from TOML as part of the engine configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::RegionId;
use crate::forces::Posture;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionStrategy {
    /// Posture adopted by overstaffed defending brigades (probe or attack)
    pub preferred_offensive: Posture,
    /// Density at or above which a defending brigade goes on the offensive
    pub overstaffed_density: f32,
    /// Fraction of active brigades allowed in offensive posture at once
    pub max_offensive_share: f32,
    /// Floor on offensive brigades; defenders are promoted to probe to reach it
    pub min_offensive_formations: usize,
    /// Treat corridor-priority regions as must-hold
    pub defend_corridors: bool,
    pub corridor_priority: BTreeSet<RegionId>,
    pub strategic_offensive: BTreeSet<RegionId>,
    pub must_hold: BTreeSet<RegionId>,
}

impl Default for FactionStrategy {
    fn default() -> Self {
        Self {
            preferred_offensive: Posture::Attack,
            overstaffed_density: 150.0,
            max_offensive_share: 0.4,
            min_offensive_formations: 0,
            defend_corridors: true,
            corridor_priority: BTreeSet::new(),
            strategic_offensive: BTreeSet::new(),
            must_hold: BTreeSet::new(),
        }
    }
}

impl FactionStrategy {
    /// Regions a brigade must never leave undefended
    pub fn is_defensive_zone(&self, region: &RegionId) -> bool {
        self.must_hold.contains(region)
            || (self.defend_corridors && self.corridor_priority.contains(region))
    }

    pub fn is_offensive_zone(&self, region: &RegionId) -> bool {
        self.strategic_offensive.contains(region)
    }

    /// Simultaneous offensive brigades allowed out of `active` (at least one)
    pub fn offensive_cap(&self, active: usize) -> usize {
        ((active as f32 * self.max_offensive_share).floor() as usize).max(1)
    }
}
