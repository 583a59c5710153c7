//! Command orders emitted for the order-execution layer

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, FormationId, Turn, UnitId};
use crate::forces::Posture;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOrder {
    Posture {
        formation: FormationId,
        posture: Posture,
    },
    /// Transfer one unit between two brigades of the same faction
    Reshape {
        unit: UnitId,
        from: FormationId,
        to: FormationId,
    },
    Attack {
        formation: FormationId,
        target: UnitId,
    },
}

impl CommandOrder {
    pub fn is_posture(&self) -> bool {
        matches!(self, Self::Posture { .. })
    }

    pub fn is_reshape(&self) -> bool {
        matches!(self, Self::Reshape { .. })
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Attack { .. })
    }
}

/// One faction's orders for one turn: postures, then reshapes, then attacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionOrders {
    pub faction: FactionId,
    pub turn: Turn,
    pub orders: Vec<CommandOrder>,
}

impl FactionOrders {
    pub fn new(faction: FactionId, turn: Turn) -> Self {
        Self {
            faction,
            turn,
            orders: Vec::new(),
        }
    }

    pub fn attacks(&self) -> impl Iterator<Item = (&FormationId, &UnitId)> {
        self.orders.iter().filter_map(|order| match order {
            CommandOrder::Attack { formation, target } => Some((formation, target)),
            _ => None,
        })
    }

    pub fn count(&self, predicate: impl Fn(&CommandOrder) -> bool) -> usize {
        self.orders.iter().filter(|order| predicate(order)).count()
    }
}
