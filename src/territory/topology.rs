//! Territory topology: main body and enclaves of one faction

use std::collections::BTreeSet;

use crate::core::types::{FactionId, UnitId};
use crate::graph::{connected_components, AdjacencyGraph};
use crate::territory::control::ControlSnapshot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerritoryTopology {
    pub faction: FactionId,
    /// Largest connected body of controlled units
    pub main_territory: BTreeSet<UnitId>,
    /// Remaining disconnected pockets, ordered by smallest member id
    pub enclaves: Vec<BTreeSet<UnitId>>,
}

impl TerritoryTopology {
    pub fn enclave_units(&self) -> BTreeSet<UnitId> {
        self.enclaves.iter().flatten().cloned().collect()
    }

    pub fn enclave_index(&self, unit: &UnitId) -> Option<usize> {
        self.enclaves.iter().position(|enclave| enclave.contains(unit))
    }

    pub fn in_main_territory(&self, unit: &UnitId) -> bool {
        self.main_territory.contains(unit)
    }

    pub fn unit_count(&self) -> usize {
        self.main_territory.len() + self.enclaves.iter().map(BTreeSet::len).sum::<usize>()
    }
}

/// Split a faction's controlled units into main territory and enclaves
pub fn analyze_territory(
    faction: &FactionId,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
) -> TerritoryTopology {
    let owned = control.units_of(faction);
    let mut components = connected_components(&owned, graph).into_iter();

    let main_territory = components.next().unwrap_or_default();
    let mut enclaves: Vec<BTreeSet<UnitId>> = components.collect();
    enclaves.sort_by(|a, b| a.first().cmp(&b.first()));

    TerritoryTopology {
        faction: faction.clone(),
        main_territory,
        enclaves,
    }
}
