//! Unit-level assignment derived from the region allocation
//!
//! Front units are grouped by (controller, region). A group covered by a
//! single brigade goes to it whole; a group shared by several brigades is
//! split by hop distance from their HQs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aor::allocation::RegionAllocation;
use crate::core::types::{FactionId, FormationId, RegionId, UnitId};
use crate::forces::Roster;
use crate::graph::{label_from_seeds, Theater};
use crate::territory::ControlSnapshot;

/// Unit to holding formation; `None` means unassigned (rear or locally defended)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    holders: BTreeMap<UnitId, Option<FormationId>>,
}

impl Assignment {
    /// Every unit present and unassigned
    pub fn unassigned<'a>(units: impl IntoIterator<Item = &'a UnitId>) -> Self {
        Self {
            holders: units.into_iter().map(|unit| (unit.clone(), None)).collect(),
        }
    }

    pub fn holder(&self, unit: &UnitId) -> Option<&FormationId> {
        self.holders.get(unit).and_then(Option::as_ref)
    }

    pub fn set(&mut self, unit: UnitId, holder: Option<FormationId>) {
        self.holders.insert(unit, holder);
    }

    pub fn units_of(&self, formation: &FormationId) -> BTreeSet<UnitId> {
        self.holders
            .iter()
            .filter(|(_, holder)| holder.as_ref() == Some(formation))
            .map(|(unit, _)| unit.clone())
            .collect()
    }

    /// Unit sets of every formation that holds ground
    pub fn by_formation(&self) -> BTreeMap<FormationId, BTreeSet<UnitId>> {
        let mut grouped: BTreeMap<FormationId, BTreeSet<UnitId>> = BTreeMap::new();
        for (unit, holder) in &self.holders {
            if let Some(formation) = holder {
                grouped.entry(formation.clone()).or_default().insert(unit.clone());
            }
        }
        grouped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, Option<&FormationId>)> {
        self.holders.iter().map(|(unit, holder)| (unit, holder.as_ref()))
    }

    pub fn assigned_count(&self) -> usize {
        self.holders.values().filter(|holder| holder.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

/// Active brigades allocated to each (faction, region), in id order
fn region_candidates(
    allocation: &RegionAllocation,
    roster: &Roster,
) -> BTreeMap<(FactionId, RegionId), Vec<FormationId>> {
    let mut candidates: BTreeMap<(FactionId, RegionId), Vec<FormationId>> = BTreeMap::new();
    for (formation_id, regions) in allocation.iter() {
        let Some(formation) = roster.get(formation_id).filter(|f| f.is_active_brigade()) else {
            continue;
        };
        for region in regions {
            candidates
                .entry((formation.faction.clone(), region.clone()))
                .or_default()
                .push(formation_id.clone());
        }
    }
    candidates
}

/// Expand the region allocation down to individual units
pub fn derive_assignment(
    allocation: &RegionAllocation,
    expanded_front: &BTreeSet<UnitId>,
    control: &ControlSnapshot,
    theater: &Theater,
    roster: &Roster,
) -> Assignment {
    let mut assignment = Assignment::unassigned(control.units());

    let mut groups: BTreeMap<(FactionId, RegionId), BTreeSet<UnitId>> = BTreeMap::new();
    for unit in expanded_front {
        let (Some(faction), Some(region)) =
            (control.controller(unit), theater.regions.region_of(unit))
        else {
            continue;
        };
        groups
            .entry((faction.clone(), region.clone()))
            .or_default()
            .insert(unit.clone());
    }

    let candidates = region_candidates(allocation, roster);

    for (key, units) in &groups {
        let Some(holders) = candidates.get(key) else {
            continue;
        };
        match holders.as_slice() {
            [] => {}
            [only] => {
                for unit in units {
                    assignment.set(unit.clone(), Some(only.clone()));
                }
            }
            [lowest, ..] => {
                let seeds = holders.iter().filter_map(|id| {
                    roster
                        .get(id)
                        .and_then(|f| f.hq.clone())
                        .filter(|hq| units.contains(hq))
                        .map(|hq| (hq, id.clone()))
                });
                let claims = label_from_seeds(&theater.graph, seeds, |unit| units.contains(unit));

                for unit in units {
                    let holder = claims
                        .get(unit)
                        .map(|claim| claim.label.clone())
                        .unwrap_or_else(|| lowest.clone());
                    assignment.set(unit.clone(), Some(holder));
                }
                tracing::debug!(
                    "Region {} of {} shared by {} brigades",
                    key.1,
                    key.0,
                    holders.len()
                );
            }
        }
    }

    assignment
}
