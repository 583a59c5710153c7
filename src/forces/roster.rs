//! Formation roster keyed and iterated by formation id

use std::collections::BTreeMap;

use crate::core::types::{FactionId, FormationId, UnitId};
use crate::forces::formation::{Formation, FormationKind};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    formations: BTreeMap<FormationId, Formation>,
}

impl Roster {
    /// Build a roster; a later formation with a repeated id replaces the earlier one
    pub fn new(formations: impl IntoIterator<Item = Formation>) -> Self {
        let formations = formations.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self { formations }
    }

    pub fn get(&self, id: &FormationId) -> Option<&Formation> {
        self.formations.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formation> {
        self.formations.values()
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    /// Active combat-capable formations of a faction, in id order
    pub fn active_brigades(&self, faction: &FactionId) -> Vec<&Formation> {
        self.formations
            .values()
            .filter(|f| f.is_active_brigade() && &f.faction == faction)
            .collect()
    }

    /// Corps membership of a formation
    pub fn corps_of(&self, id: &FormationId) -> Option<&FormationId> {
        self.formations.get(id).and_then(|f| f.corps.as_ref())
    }

    /// HQ unit of a corps' own command formation
    pub fn corps_hq(&self, corps: &FormationId) -> Option<&UnitId> {
        self.formations
            .get(corps)
            .filter(|f| f.kind == FormationKind::CorpsAsset)
            .and_then(|f| f.hq.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::formation::FormationStatus;

    fn sample() -> Roster {
        Roster::new(vec![
            Formation::brigade("b2", "RED").with_corps("c1"),
            Formation::brigade("b1", "RED"),
            Formation::brigade("b3", "BLUE"),
            Formation::brigade("b4", "RED").with_status(FormationStatus::Inactive),
            Formation::corps_asset("c1", "RED").with_hq("S5"),
        ])
    }

    #[test]
    fn test_active_brigades_sorted_by_id() {
        let roster = sample();
        let ids: Vec<&str> = roster
            .active_brigades(&FactionId::new("RED"))
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_corps_lookup() {
        let roster = sample();
        assert_eq!(roster.corps_of(&FormationId::new("b2")), Some(&FormationId::new("c1")));
        assert_eq!(roster.corps_of(&FormationId::new("b1")), None);
        assert_eq!(roster.corps_hq(&FormationId::new("c1")), Some(&UnitId::new("S5")));
        // A brigade id is not a corps command element
        assert_eq!(roster.corps_hq(&FormationId::new("b2")), None);
    }
}
