//! Corps sectors
//!
//! The main territory is split into one contiguous sector per corps by a
//! simultaneous breadth-first fill from the corps headquarters. Each
//! sector's front regions are then put in walk order, which is the order
//! brigades extend along when they take ground.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{FactionId, FormationId, RegionId, UnitId};
use crate::forces::{FormationKind, Roster};
use crate::graph::{label_from_seeds, AdjacencyGraph, RegionIndex};
use crate::territory::control::ControlSnapshot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpsSectors {
    pub sector_by_corps: BTreeMap<FormationId, BTreeSet<UnitId>>,
    pub corps_by_unit: BTreeMap<UnitId, FormationId>,
}

impl CorpsSectors {
    pub fn sector(&self, corps: &FormationId) -> Option<&BTreeSet<UnitId>> {
        self.sector_by_corps.get(corps)
    }

    pub fn has_sector(&self, corps: &FormationId) -> bool {
        self.sector_by_corps.contains_key(corps)
    }

    pub fn is_empty(&self) -> bool {
        self.sector_by_corps.is_empty()
    }
}

/// HQ seeds for every corps of the faction that can anchor in the main territory.
///
/// A corps with a command element is seeded at that element's HQ, or not
/// at all when the HQ lies outside the main territory. A corps known only
/// through its brigades is anchored at the HQ of its lowest-id active
/// brigade inside the main territory.
fn corps_seeds(
    faction: &FactionId,
    main_territory: &BTreeSet<UnitId>,
    roster: &Roster,
) -> BTreeMap<FormationId, UnitId> {
    let mut seeds: BTreeMap<FormationId, UnitId> = BTreeMap::new();

    for formation in roster.iter() {
        if formation.kind != FormationKind::CorpsAsset
            || !formation.is_active()
            || &formation.faction != faction
        {
            continue;
        }
        if let Some(hq) = formation.hq.as_ref().filter(|hq| main_territory.contains(*hq)) {
            seeds.insert(formation.id.clone(), hq.clone());
        }
    }

    for brigade in roster.active_brigades(faction) {
        let (Some(corps), Some(hq)) = (brigade.corps.as_ref(), brigade.hq.as_ref()) else {
            continue;
        };
        let has_command_element = roster
            .get(corps)
            .is_some_and(|f| f.kind == FormationKind::CorpsAsset);
        if !has_command_element && main_territory.contains(hq) && !seeds.contains_key(corps) {
            seeds.insert(corps.clone(), hq.clone());
        }
    }

    seeds
}

/// Partition the main territory among the faction's corps
pub fn partition_corps_sectors(
    faction: &FactionId,
    main_territory: &BTreeSet<UnitId>,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    roster: &Roster,
) -> CorpsSectors {
    let seeds = corps_seeds(faction, main_territory, roster);
    if seeds.is_empty() {
        return CorpsSectors::default();
    }

    let claims = label_from_seeds(
        graph,
        seeds.into_iter().map(|(corps, hq)| (hq, corps)),
        |unit| main_territory.contains(unit) && control.is_controlled_by(unit, faction),
    );

    let mut sectors = CorpsSectors::default();
    for (unit, claim) in claims {
        sectors
            .sector_by_corps
            .entry(claim.label.clone())
            .or_default()
            .insert(unit.clone());
        sectors.corps_by_unit.insert(unit, claim.label);
    }
    sectors
}

/// Regions holding front-active units of `units`, in walk order.
///
/// The walk starts at the lowest region and keeps stepping to the
/// lowest unvisited adjacent front region. When it runs dry a new
/// segment starts at the lowest region not yet visited.
pub fn front_walk_order(
    units: &BTreeSet<UnitId>,
    front_active: &BTreeSet<UnitId>,
    regions: &RegionIndex,
) -> Vec<RegionId> {
    let mut remaining: BTreeSet<RegionId> = units
        .iter()
        .filter(|unit| front_active.contains(*unit))
        .filter_map(|unit| regions.region_of(unit).cloned())
        .collect();

    let mut order = Vec::with_capacity(remaining.len());
    while let Some(start) = remaining.pop_first() {
        let mut current = start;
        loop {
            let next = regions
                .neighbors(&current)
                .find(|region| remaining.contains(*region))
                .cloned();
            order.push(current);
            match next {
                Some(region) => {
                    remaining.remove(&region);
                    current = region;
                }
                None => break,
            }
        }
    }
    order
}

/// Corps owning the sector closest to `hq` through the faction's own units.
///
/// Claims are ranked by hop count, then unit id. `None` when no sector is
/// reachable or the HQ is not held by the faction.
pub fn nearest_sector(
    hq: &UnitId,
    faction: &FactionId,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    corps_by_unit: &BTreeMap<UnitId, FormationId>,
) -> Option<FormationId> {
    let claims = label_from_seeds(graph, [(hq.clone(), ())], |unit| {
        control.is_controlled_by(unit, faction)
    });

    claims
        .iter()
        .filter_map(|(unit, claim)| corps_by_unit.get(unit).map(|corps| (claim.hops, unit, corps)))
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, _, corps)| corps.clone())
}
