//! Unit adjacency graph and the region layer above it

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{Edge, RegionId, UnitId};

/// Undirected unit graph with sorted, deduplicated neighbor lists
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    neighbors: BTreeMap<UnitId, Vec<UnitId>>,
}

impl AdjacencyGraph {
    /// Build from an edge list. Self-loops and repeated edges are dropped.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut sets: BTreeMap<UnitId, BTreeSet<UnitId>> = BTreeMap::new();
        for edge in edges {
            if edge.a == edge.b {
                continue;
            }
            sets.entry(edge.a.clone()).or_default().insert(edge.b.clone());
            sets.entry(edge.b.clone()).or_default().insert(edge.a.clone());
        }

        let neighbors = sets
            .into_iter()
            .map(|(unit, set)| (unit, set.into_iter().collect()))
            .collect();
        Self { neighbors }
    }

    /// Neighbors in id order; empty for units without edges
    pub fn neighbors(&self, unit: &UnitId) -> &[UnitId] {
        self.neighbors.get(unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn are_adjacent(&self, x: &UnitId, y: &UnitId) -> bool {
        self.neighbors(x).binary_search(y).is_ok()
    }

    /// Every unit that appears on at least one edge, in id order
    pub fn units(&self) -> impl Iterator<Item = &UnitId> {
        self.neighbors.keys()
    }

    /// Each undirected edge exactly once as `(a, b)` with `a < b`, in order
    pub fn edges(&self) -> impl Iterator<Item = (&UnitId, &UnitId)> {
        self.neighbors.iter().flat_map(|(unit, list)| {
            list.iter()
                .filter(move |other| unit < *other)
                .map(move |other| (unit, other))
        })
    }

    pub fn unit_count(&self) -> usize {
        self.neighbors.len()
    }
}

/// Unit-to-region membership plus region adjacency
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    region_of: BTreeMap<UnitId, RegionId>,
    units_by_region: BTreeMap<RegionId, BTreeSet<UnitId>>,
    adjacency: BTreeMap<RegionId, BTreeSet<RegionId>>,
}

impl RegionIndex {
    /// Two regions are adjacent when any edge joins one of their units
    pub fn new(region_of: BTreeMap<UnitId, RegionId>, graph: &AdjacencyGraph) -> Self {
        let mut units_by_region: BTreeMap<RegionId, BTreeSet<UnitId>> = BTreeMap::new();
        for (unit, region) in &region_of {
            units_by_region.entry(region.clone()).or_default().insert(unit.clone());
        }

        let mut adjacency: BTreeMap<RegionId, BTreeSet<RegionId>> = BTreeMap::new();
        for (a, b) in graph.edges() {
            let (Some(ra), Some(rb)) = (region_of.get(a), region_of.get(b)) else {
                continue;
            };
            if ra == rb {
                continue;
            }
            adjacency.entry(ra.clone()).or_default().insert(rb.clone());
            adjacency.entry(rb.clone()).or_default().insert(ra.clone());
        }

        Self {
            region_of,
            units_by_region,
            adjacency,
        }
    }

    pub fn region_of(&self, unit: &UnitId) -> Option<&RegionId> {
        self.region_of.get(unit)
    }

    pub fn units_in(&self, region: &RegionId) -> Option<&BTreeSet<UnitId>> {
        self.units_by_region.get(region)
    }

    pub fn neighbors(&self, region: &RegionId) -> impl Iterator<Item = &RegionId> {
        self.adjacency.get(region).into_iter().flatten()
    }

    pub fn are_adjacent(&self, x: &RegionId, y: &RegionId) -> bool {
        self.adjacency.get(x).is_some_and(|set| set.contains(y))
    }
}

/// The static map a turn runs on
#[derive(Debug, Clone, Default)]
pub struct Theater {
    pub graph: AdjacencyGraph,
    pub regions: RegionIndex,
}

impl Theater {
    pub fn new(edges: &[Edge], unit_regions: BTreeMap<UnitId, RegionId>) -> Self {
        let graph = AdjacencyGraph::from_edges(edges);
        let regions = RegionIndex::new(unit_regions, &graph);
        Self { graph, regions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str) -> UnitId {
        UnitId::new(id)
    }

    #[test]
    fn test_neighbors_sorted_and_deduplicated() {
        let edges = vec![
            Edge::new("S3", "S1"),
            Edge::new("S1", "S2"),
            Edge::new("S2", "S1"),
            Edge::new("S1", "S1"),
        ];
        let graph = AdjacencyGraph::from_edges(&edges);

        assert_eq!(graph.neighbors(&unit("S1")), &[unit("S2"), unit("S3")]);
        assert_eq!(graph.neighbors(&unit("S2")), &[unit("S1")]);
        assert!(graph.neighbors(&unit("S9")).is_empty());
        assert!(graph.are_adjacent(&unit("S3"), &unit("S1")));
        assert!(!graph.are_adjacent(&unit("S2"), &unit("S3")));
    }

    #[test]
    fn test_edges_listed_once() {
        let edges = vec![Edge::new("b", "a"), Edge::new("b", "c"), Edge::new("a", "b")];
        let graph = AdjacencyGraph::from_edges(&edges);
        let listed: Vec<(&str, &str)> = graph
            .edges()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(listed, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_region_adjacency_from_unit_edges() {
        let edges = vec![Edge::new("S1", "S2"), Edge::new("S2", "S3"), Edge::new("S3", "S4")];
        let regions: BTreeMap<UnitId, RegionId> = [
            ("S1", "R1"),
            ("S2", "R1"),
            ("S3", "R2"),
            ("S4", "R3"),
        ]
        .into_iter()
        .map(|(u, r)| (unit(u), RegionId::new(r)))
        .collect();

        let theater = Theater::new(&edges, regions);
        let r1 = RegionId::new("R1");
        let r2 = RegionId::new("R2");
        let r3 = RegionId::new("R3");

        assert!(theater.regions.are_adjacent(&r1, &r2));
        assert!(theater.regions.are_adjacent(&r3, &r2));
        assert!(!theater.regions.are_adjacent(&r1, &r3));
        assert_eq!(theater.regions.units_in(&r1).map(|s| s.len()), Some(2));
        assert_eq!(theater.regions.region_of(&unit("S4")), Some(&r3));
    }
}
