//! Formation-to-region allocation
//!
//! Each formation first claims its home region, then extends along the
//! front walk to neighboring front regions nobody has claimed yet, up to
//! the per-formation cap. Front regions left unclaimed stay uncovered.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::{FormationId, RegionId};
use crate::forces::Formation;
use crate::graph::RegionIndex;

/// Formation id to ordered region list; the first entry is the home region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionAllocation {
    regions: BTreeMap<FormationId, Vec<RegionId>>,
}

impl RegionAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions allocated to a formation, empty when it has none
    pub fn regions_of(&self, formation: &FormationId) -> &[RegionId] {
        self.regions.get(formation).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn includes(&self, formation: &FormationId, region: &RegionId) -> bool {
        self.regions_of(formation).contains(region)
    }

    pub fn insert(&mut self, formation: FormationId, regions: Vec<RegionId>) {
        self.regions.insert(formation, regions);
    }

    pub fn merge(&mut self, other: RegionAllocation) {
        self.regions.extend(other.regions);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FormationId, &Vec<RegionId>)> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Longest region list in the allocation
    pub fn max_regions(&self) -> usize {
        self.regions.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Home region from the formation's own field, else the region of its HQ
pub fn resolve_home_region(formation: &Formation, regions: &RegionIndex) -> Option<RegionId> {
    formation
        .home_region
        .clone()
        .or_else(|| formation.hq.as_ref().and_then(|hq| regions.region_of(hq)).cloned())
}

/// Allocate regions to one group of formations sharing a front walk
pub fn allocate_regions(
    formations: &[&Formation],
    front_order: &[RegionId],
    regions: &RegionIndex,
    cap: usize,
) -> RegionAllocation {
    let mut ordered: Vec<&Formation> = formations.to_vec();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut allocation = RegionAllocation::new();
    let mut claimed: BTreeSet<RegionId> = BTreeSet::new();
    let mut homes: BTreeMap<FormationId, RegionId> = BTreeMap::new();

    // Phase 1: home regions
    for formation in &ordered {
        match resolve_home_region(formation, regions) {
            Some(home) if cap > 0 => {
                claimed.insert(home.clone());
                homes.insert(formation.id.clone(), home.clone());
                allocation.insert(formation.id.clone(), vec![home]);
            }
            _ => {
                tracing::debug!("Formation {} has no resolvable home region", formation.id);
                allocation.insert(formation.id.clone(), Vec::new());
            }
        }
    }

    // Phase 2: extend along the front walk
    for formation in &ordered {
        let Some(home) = homes.get(&formation.id) else {
            continue;
        };
        let Some(list) = allocation.regions.get_mut(&formation.id) else {
            continue;
        };

        for region in front_order {
            if list.len() >= cap {
                break;
            }
            if claimed.contains(region) || !regions.are_adjacent(home, region) {
                continue;
            }
            claimed.insert(region.clone());
            list.push(region.clone());
        }
    }

    allocation
}
