//! Per-brigade facts the command policy decides on

use std::collections::{BTreeMap, BTreeSet};

use crate::aor::{resolve_home_region, Assignment};
use crate::core::types::{FactionId, FormationId, RegionId, UnitId};
use crate::forces::{Formation, Roster};
use crate::graph::Theater;
use crate::territory::ControlSnapshot;

/// Personnel per held unit; a brigade holding nothing counts as one unit
pub fn density(personnel: u32, units: usize) -> f32 {
    personnel as f32 / units.max(1) as f32
}

/// Density of every formation that holds ground
pub fn formation_densities(assignment: &Assignment, roster: &Roster) -> BTreeMap<FormationId, f32> {
    assignment
        .by_formation()
        .into_iter()
        .filter_map(|(id, units)| roster.get(&id).map(|f| (id, density(f.personnel, units.len()))))
        .collect()
}

#[derive(Debug, Clone)]
pub struct BrigadeState<'a> {
    pub formation: &'a Formation,
    pub units: BTreeSet<UnitId>,
    pub density: f32,
    /// Holds a unit adjacent to hostile ground
    pub front_contact: bool,
    /// Home region (resolved) and HQ region, for zone checks
    pub home_region: Option<RegionId>,
    pub hq_region: Option<RegionId>,
}

impl<'a> BrigadeState<'a> {
    pub fn id(&self) -> &FormationId {
        &self.formation.id
    }

    /// Home and HQ regions, deduplicated
    pub fn zone_regions(&self) -> impl Iterator<Item = &RegionId> {
        let hq = self.hq_region.as_ref().filter(|r| Some(*r) != self.home_region.as_ref());
        self.home_region.iter().chain(hq)
    }
}

/// States of the faction's active brigades, in id order
pub fn brigade_states<'a>(
    faction: &FactionId,
    roster: &'a Roster,
    assignment: &Assignment,
    control: &ControlSnapshot,
    theater: &Theater,
) -> Vec<BrigadeState<'a>> {
    roster
        .active_brigades(faction)
        .into_iter()
        .map(|formation| {
            let units = assignment.units_of(&formation.id);
            let front_contact = units.iter().any(|unit| {
                theater
                    .graph
                    .neighbors(unit)
                    .iter()
                    .any(|neighbor| control.is_hostile_pair(unit, neighbor))
            });
            BrigadeState {
                formation,
                density: density(formation.personnel, units.len()),
                front_contact,
                home_region: resolve_home_region(formation, &theater.regions),
                hq_region: formation
                    .hq
                    .as_ref()
                    .and_then(|hq| theater.regions.region_of(hq))
                    .cloned(),
                units,
            }
        })
        .collect()
}
