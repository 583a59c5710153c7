//! Multi-source labeling search over a restricted subgraph
//!
//! One breadth-first search serves every flood-fill in the crate: corps
//! sector partitioning, splitting a shared region between brigade HQs,
//! connected-component discovery and the nearest-sector fallback.
//!
//! The search is level-synchronous. A unit is claimed at its minimal hop
//! count from any seed; when several labels reach it at that hop count
//! the smallest label wins. The result therefore does not depend on the
//! order seeds are supplied in.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;

use super::adjacency::AdjacencyGraph;
use crate::core::types::UnitId;

/// A unit claimed during a labeling search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim<L> {
    pub label: L,
    pub hops: u32,
}

fn offer<L: Ord>(frontier: &mut BTreeMap<UnitId, L>, unit: UnitId, label: L) {
    match frontier.entry(unit) {
        Entry::Vacant(slot) => {
            slot.insert(label);
        }
        Entry::Occupied(mut slot) => {
            if label < *slot.get() {
                slot.insert(label);
            }
        }
    }
}

/// Label every member unit reachable from the seeds.
///
/// Seeds outside the member set are ignored. Units unreachable from any
/// seed are absent from the result.
pub fn label_from_seeds<L, I, F>(
    graph: &AdjacencyGraph,
    seeds: I,
    is_member: F,
) -> BTreeMap<UnitId, Claim<L>>
where
    L: Clone + Ord,
    I: IntoIterator<Item = (UnitId, L)>,
    F: Fn(&UnitId) -> bool,
{
    let mut frontier: BTreeMap<UnitId, L> = BTreeMap::new();
    for (unit, label) in seeds {
        if is_member(&unit) {
            offer(&mut frontier, unit, label);
        }
    }

    let mut claims: BTreeMap<UnitId, Claim<L>> = BTreeMap::new();
    let mut hops = 0;

    while !frontier.is_empty() {
        for (unit, label) in &frontier {
            claims.insert(
                unit.clone(),
                Claim {
                    label: label.clone(),
                    hops,
                },
            );
        }

        let mut next: BTreeMap<UnitId, L> = BTreeMap::new();
        for (unit, label) in &frontier {
            for neighbor in graph.neighbors(unit) {
                if claims.contains_key(neighbor) || !is_member(neighbor) {
                    continue;
                }
                offer(&mut next, neighbor.clone(), label.clone());
            }
        }

        frontier = next;
        hops += 1;
    }

    claims
}

/// Units reachable from `start` inside the member set, `start` included
pub fn reachable_from<F>(graph: &AdjacencyGraph, start: &UnitId, is_member: F) -> BTreeSet<UnitId>
where
    F: Fn(&UnitId) -> bool,
{
    label_from_seeds(graph, [(start.clone(), ())], is_member)
        .into_keys()
        .collect()
}

/// Connected components of the subgraph induced by `units`.
///
/// Ordered largest first, then by smallest member id.
pub fn connected_components(
    units: &BTreeSet<UnitId>,
    graph: &AdjacencyGraph,
) -> Vec<BTreeSet<UnitId>> {
    let mut visited: AHashSet<&UnitId> = AHashSet::with_capacity(units.len());
    let mut components = Vec::new();

    for unit in units {
        if visited.contains(unit) {
            continue;
        }
        let component = reachable_from(graph, unit, |u| units.contains(u));
        for member in &component {
            if let Some(original) = units.get(member) {
                visited.insert(original);
            }
        }
        components.push(component);
    }

    // Components are discovered from their smallest member, so ties keep discovery order
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    components
}
