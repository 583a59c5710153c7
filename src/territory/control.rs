//! Control snapshot: which faction holds each unit this turn

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, UnitId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlSnapshot {
    controllers: BTreeMap<UnitId, Option<FactionId>>,
}

impl ControlSnapshot {
    pub fn new(controllers: BTreeMap<UnitId, Option<FactionId>>) -> Self {
        Self { controllers }
    }

    /// Controller of a unit; `None` for uncontrolled or unknown units
    pub fn controller(&self, unit: &UnitId) -> Option<&FactionId> {
        self.controllers.get(unit).and_then(Option::as_ref)
    }

    pub fn is_controlled_by(&self, unit: &UnitId, faction: &FactionId) -> bool {
        self.controller(unit) == Some(faction)
    }

    /// Both units controlled, by different factions
    pub fn is_hostile_pair(&self, x: &UnitId, y: &UnitId) -> bool {
        match (self.controller(x), self.controller(y)) {
            (Some(fx), Some(fy)) => fx != fy,
            _ => false,
        }
    }

    /// Every unit in the snapshot, controlled or not
    pub fn units(&self) -> impl Iterator<Item = &UnitId> {
        self.controllers.keys()
    }

    pub fn units_of(&self, faction: &FactionId) -> BTreeSet<UnitId> {
        self.controllers
            .iter()
            .filter(|(_, controller)| controller.as_ref() == Some(faction))
            .map(|(unit, _)| unit.clone())
            .collect()
    }

    /// Factions holding at least one unit
    pub fn factions(&self) -> BTreeSet<FactionId> {
        self.controllers.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl FromIterator<(UnitId, Option<FactionId>)> for ControlSnapshot {
    fn from_iter<T: IntoIterator<Item = (UnitId, Option<FactionId>)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
