//! Front detection
//!
//! A front-active unit is a controlled unit touching a unit held by a
//! different faction. Brigades also cover a shallow band behind it,
//! grown ring by ring through units of the same controller.

use std::collections::BTreeSet;

use crate::core::types::UnitId;
use crate::graph::AdjacencyGraph;
use crate::territory::control::ControlSnapshot;

pub fn front_active_units(control: &ControlSnapshot, graph: &AdjacencyGraph) -> BTreeSet<UnitId> {
    control
        .units()
        .filter(|unit| {
            graph
                .neighbors(unit)
                .iter()
                .any(|neighbor| control.is_hostile_pair(unit, neighbor))
        })
        .cloned()
        .collect()
}

/// Front units plus `depth` rings of same-controller units behind them
pub fn expand_front(
    front: &BTreeSet<UnitId>,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    depth: u32,
) -> BTreeSet<UnitId> {
    let mut covered = front.clone();
    let mut ring: Vec<UnitId> = front.iter().cloned().collect();

    for _ in 0..depth {
        let mut next = Vec::new();
        for unit in &ring {
            let Some(owner) = control.controller(unit) else {
                continue;
            };
            for neighbor in graph.neighbors(unit) {
                if control.is_controlled_by(neighbor, owner) && covered.insert(neighbor.clone()) {
                    next.push(neighbor.clone());
                }
            }
        }
        if next.is_empty() {
            break;
        }
        ring = next;
    }

    covered
}
