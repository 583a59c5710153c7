//! Turn input: everything the engine consumes for one turn step

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bot::PressureSample;
use crate::core::error::{FrontError, Result};
use crate::core::types::{Edge, FactionId, RegionId, Turn, UnitId};
use crate::forces::{Formation, Roster};
use crate::graph::Theater;
use crate::territory::ControlSnapshot;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnInput {
    pub turn: Turn,
    /// Factions to plan for; factions holding ground are always included
    #[serde(default)]
    pub factions: Vec<FactionId>,
    /// Factions whose orders the engine generates
    #[serde(default)]
    pub bot_factions: Vec<FactionId>,
    pub edges: Vec<Edge>,
    pub unit_regions: BTreeMap<UnitId, RegionId>,
    pub control: ControlSnapshot,
    pub formations: Vec<Formation>,
    #[serde(default)]
    pub pressure: Vec<PressureSample>,
}

impl TurnInput {
    /// Parse and validate a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let input: TurnInput = serde_json::from_str(contents)?;
        input.validate()?;
        Ok(input)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Every unit named by the control snapshot or an edge must have a region
    pub fn validate(&self) -> Result<()> {
        let edge_units = self.edges.iter().flat_map(|edge| [&edge.a, &edge.b]);
        if let Some(missing) = self
            .control
            .units()
            .chain(edge_units)
            .find(|unit| !self.unit_regions.contains_key(*unit))
        {
            return Err(FrontError::InvalidInput(format!("unit {} has no region", missing)));
        }

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = self.formations.iter().find(|f| !seen.insert(&f.id)) {
            return Err(FrontError::InvalidInput(format!(
                "formation {} listed more than once",
                duplicate.id
            )));
        }
        Ok(())
    }

    /// Planned factions: declared ones plus every faction holding ground
    pub fn faction_ids(&self) -> BTreeSet<FactionId> {
        let mut factions: BTreeSet<FactionId> = self.factions.iter().cloned().collect();
        factions.extend(self.control.factions());
        factions
    }

    pub fn bot_faction_ids(&self) -> BTreeSet<FactionId> {
        self.bot_factions.iter().cloned().collect()
    }

    pub fn theater(&self) -> Theater {
        Theater::new(&self.edges, self.unit_regions.clone())
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.formations.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "turn": 3,
        "bot_factions": ["RED"],
        "edges": [{ "a": "S1", "b": "S2" }],
        "unit_regions": { "S1": "R1", "S2": "R2" },
        "control": { "S1": "RED", "S2": "BLUE" },
        "formations": [{ "id": "b1", "faction": "RED", "hq": "S1" }],
        "pressure": [{ "a": "S2", "b": "S1", "value": 2.0 }]
    }"#;

    #[test]
    fn test_parse_turn_input() {
        let input = TurnInput::from_json_str(SAMPLE).expect("sample should parse");
        assert_eq!(input.turn, 3);
        assert_eq!(input.faction_ids().len(), 2);
        assert_eq!(input.bot_faction_ids().len(), 1);
        assert_eq!(input.roster().len(), 1);
        assert_eq!(input.pressure.len(), 1);
    }

    #[test]
    fn test_unit_without_region_rejected() {
        let broken = SAMPLE.replace(r#""S2": "R2""#, r#""S3": "R2""#);
        let result = TurnInput::from_json_str(&broken);
        assert!(matches!(result, Err(FrontError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_formation_rejected() {
        let broken = SAMPLE.replace(
            r#"[{ "id": "b1", "faction": "RED", "hq": "S1" }]"#,
            r#"[{ "id": "b1", "faction": "RED" }, { "id": "b1", "faction": "RED" }]"#,
        );
        assert!(TurnInput::from_json_str(&broken).is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(TurnInput::from_json_str("{"), Err(FrontError::JsonError(_))));
    }
}
