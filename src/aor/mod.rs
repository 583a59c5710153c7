//! Area-of-responsibility planning
//!
//! Per faction: analyze the territory, partition the main body into corps
//! sectors, then allocate regions to brigades sector by sector (or
//! enclave by enclave). The unit-level assignment is derived from the
//! combined allocation of all factions and repaired for contiguity.

pub mod allocation;
pub mod contiguity;
pub mod derivation;

use std::collections::{BTreeMap, BTreeSet};

pub use allocation::{allocate_regions, resolve_home_region, RegionAllocation};
pub use contiguity::{
    check_contiguity, enforce_contiguity, repair_corps_contiguity, repair_formation_contiguity,
    retained_component, ContiguityCheck, ContiguityReport, RepairReport, UnitMove,
};
pub use derivation::{derive_assignment, Assignment};

use crate::core::types::{FactionId, FormationId, UnitId};
use crate::forces::{Formation, Roster};
use crate::graph::Theater;
use crate::territory::{
    analyze_territory, front_walk_order, nearest_sector, partition_corps_sectors, ControlSnapshot,
    CorpsSectors, TerritoryTopology,
};

/// Which front walk a brigade extends along
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum FrontGroup {
    Sector(FormationId),
    Enclave(usize),
    Unattached,
}

/// Everything computed for one faction before unit-level derivation
#[derive(Debug, Clone, Default)]
pub struct FactionPlan {
    pub topology: TerritoryTopology,
    pub sectors: CorpsSectors,
    pub allocation: RegionAllocation,
}

fn front_group(
    brigade: &Formation,
    topology: &TerritoryTopology,
    sectors: &CorpsSectors,
    control: &ControlSnapshot,
    theater: &Theater,
) -> FrontGroup {
    if let Some(index) = brigade.hq.as_ref().and_then(|hq| topology.enclave_index(hq)) {
        return FrontGroup::Enclave(index);
    }

    let Some(corps) = brigade.corps.as_ref() else {
        return FrontGroup::Unattached;
    };
    if sectors.has_sector(corps) {
        return FrontGroup::Sector(corps.clone());
    }

    let nearest = brigade.hq.as_ref().and_then(|hq| {
        nearest_sector(hq, &brigade.faction, control, &theater.graph, &sectors.corps_by_unit)
    });
    match nearest {
        Some(found) => {
            tracing::warn!(
                "Brigade {}: corps {} has no sector, attached to nearest sector {}",
                brigade.id,
                corps,
                found
            );
            FrontGroup::Sector(found)
        }
        None => {
            tracing::warn!(
                "Brigade {}: corps {} has no reachable sector, left unattached",
                brigade.id,
                corps
            );
            FrontGroup::Unattached
        }
    }
}

/// Topology, sectors and region allocation for one faction
pub fn plan_faction(
    faction: &FactionId,
    control: &ControlSnapshot,
    theater: &Theater,
    roster: &Roster,
    front_active: &BTreeSet<UnitId>,
    cap: usize,
) -> FactionPlan {
    let topology = analyze_territory(faction, control, &theater.graph);
    let sectors = partition_corps_sectors(
        faction,
        &topology.main_territory,
        control,
        &theater.graph,
        roster,
    );

    let mut groups: BTreeMap<FrontGroup, Vec<&Formation>> = BTreeMap::new();
    for brigade in roster.active_brigades(faction) {
        let group = front_group(brigade, &topology, &sectors, control, theater);
        groups.entry(group).or_default().push(brigade);
    }

    let mut allocation = RegionAllocation::new();
    for (group, members) in &groups {
        let order = match group {
            FrontGroup::Sector(corps) => sectors
                .sector(corps)
                .map(|units| front_walk_order(units, front_active, &theater.regions))
                .unwrap_or_default(),
            FrontGroup::Enclave(index) => topology
                .enclaves
                .get(*index)
                .map(|units| front_walk_order(units, front_active, &theater.regions))
                .unwrap_or_default(),
            FrontGroup::Unattached => Vec::new(),
        };
        allocation.merge(allocate_regions(members, &order, &theater.regions, cap));
    }

    tracing::debug!(
        "Faction {}: {} main units, {} enclaves, {} sectors, {} brigades allocated",
        faction,
        topology.main_territory.len(),
        topology.enclaves.len(),
        sectors.sector_by_corps.len(),
        allocation.len()
    );

    FactionPlan {
        topology,
        sectors,
        allocation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Edge, RegionId};
    use crate::territory::front_active_units;

    fn unit(id: &str) -> UnitId {
        UnitId::new(id)
    }

    /// RED chain r1..r4 (regions A..D) facing BLUE b1..b4, plus RED enclave
    /// unit p (region P) surrounded by BLUE unit q
    fn theater() -> (Theater, ControlSnapshot) {
        let mut edges = vec![
            Edge::new("r1", "r2"),
            Edge::new("r2", "r3"),
            Edge::new("r3", "r4"),
            Edge::new("p", "q"),
        ];
        for i in 1..=4 {
            edges.push(Edge::new(format!("r{}", i), format!("b{}", i)));
        }
        let mut regions: BTreeMap<UnitId, RegionId> = BTreeMap::new();
        let mut control: BTreeMap<UnitId, Option<FactionId>> = BTreeMap::new();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            regions.insert(unit(&format!("r{}", i + 1)), RegionId::new(*name));
            regions.insert(unit(&format!("b{}", i + 1)), RegionId::new(format!("E{}", name)));
            control.insert(unit(&format!("r{}", i + 1)), Some(FactionId::new("RED")));
            control.insert(unit(&format!("b{}", i + 1)), Some(FactionId::new("BLUE")));
        }
        regions.insert(unit("p"), RegionId::new("P"));
        regions.insert(unit("q"), RegionId::new("Q"));
        control.insert(unit("p"), Some(FactionId::new("RED")));
        control.insert(unit("q"), Some(FactionId::new("BLUE")));
        (Theater::new(&edges, regions), ControlSnapshot::new(control))
    }

    fn names(list: &[RegionId]) -> Vec<&str> {
        list.iter().map(|r| r.as_str()).collect()
    }

    #[test]
    fn test_plan_groups_by_sector_and_enclave() {
        let (theater, control) = theater();
        let front = front_active_units(&control, &theater.graph);
        let roster = Roster::new(vec![
            Formation::corps_asset("c1", "RED").with_hq("r1"),
            Formation::brigade("b-main", "RED").with_corps("c1").with_hq("r1"),
            Formation::brigade("b-pocket", "RED").with_corps("c1").with_hq("p"),
        ]);

        let plan = plan_faction(&FactionId::new("RED"), &control, &theater, &roster, &front, 3);
        assert_eq!(plan.topology.enclaves.len(), 1);
        assert_eq!(names(plan.allocation.regions_of(&FormationId::new("b-main"))), vec!["A", "B"]);
        assert_eq!(names(plan.allocation.regions_of(&FormationId::new("b-pocket"))), vec!["P"]);
    }

    #[test]
    fn test_missing_sector_reattaches_to_nearest() {
        let (theater, control) = theater();
        let front = front_active_units(&control, &theater.graph);
        let roster = Roster::new(vec![
            Formation::corps_asset("c1", "RED").with_hq("r1"),
            // c9 has a command element outside RED ground, so no sector
            Formation::corps_asset("c9", "RED").with_hq("b4"),
            Formation::brigade("b-a", "RED").with_corps("c1").with_hq("r1"),
            Formation::brigade("b-z", "RED").with_corps("c9").with_hq("r4").with_home_region("D"),
        ]);

        let plan = plan_faction(&FactionId::new("RED"), &control, &theater, &roster, &front, 3);
        assert!(!plan.sectors.has_sector(&FormationId::new("c9")));
        // b-z walks c1's front together with b-a
        assert_eq!(names(plan.allocation.regions_of(&FormationId::new("b-a"))), vec!["A", "B"]);
        assert_eq!(names(plan.allocation.regions_of(&FormationId::new("b-z"))), vec!["D", "C"]);
    }

    #[test]
    fn test_corpsless_brigade_keeps_home_only() {
        let (theater, control) = theater();
        let front = front_active_units(&control, &theater.graph);
        let roster = Roster::new(vec![Formation::brigade("b-solo", "RED").with_hq("r2")]);

        let plan = plan_faction(&FactionId::new("RED"), &control, &theater, &roster, &front, 3);
        assert_eq!(names(plan.allocation.regions_of(&FormationId::new("b-solo"))), vec!["B"]);
    }
}
