//! Turn output: the published assignment, allocation and orders

use serde::{Deserialize, Serialize};

use crate::aor::{Assignment, RegionAllocation};
use crate::bot::{CommandOrder, FactionOrders};
use crate::core::error::Result;
use crate::core::types::Turn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutput {
    pub turn: Turn,
    pub allocation: RegionAllocation,
    pub assignment: Assignment,
    /// One batch per bot faction, in faction id order
    pub orders: Vec<FactionOrders>,
}

/// Counts for logging and quick inspection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub units: usize,
    pub assigned_units: usize,
    pub formations_with_ground: usize,
    pub posture_orders: usize,
    pub reshape_orders: usize,
    pub attack_orders: usize,
}

impl TurnOutput {
    /// Pretty JSON; identical outputs always serialize to identical bytes
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> TurnSummary {
        let count = |predicate: fn(&CommandOrder) -> bool| -> usize {
            self.orders.iter().map(|batch| batch.count(predicate)).sum()
        };
        TurnSummary {
            units: self.assignment.len(),
            assigned_units: self.assignment.assigned_count(),
            formations_with_ground: self.assignment.by_formation().len(),
            posture_orders: count(CommandOrder::is_posture),
            reshape_orders: count(CommandOrder::is_reshape),
            attack_orders: count(CommandOrder::is_attack),
        }
    }
}
