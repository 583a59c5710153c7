//! Contiguity validation and repair
//!
//! Every brigade's units, and every corps' units outside enclaves, must
//! form one connected piece. A split set keeps one component and hands
//! the orphaned units to a bordering formation or leaves them unassigned.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::aor::derivation::Assignment;
use crate::core::types::{FactionId, FormationId, UnitId};
use crate::forces::{Formation, Roster};
use crate::graph::{connected_components, AdjacencyGraph};
use crate::territory::{analyze_territory, ControlSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub struct ContiguityCheck {
    /// Largest first, then by smallest unit id
    pub components: Vec<BTreeSet<UnitId>>,
}

impl ContiguityCheck {
    /// Connected, or empty
    pub fn is_contiguous(&self) -> bool {
        self.components.len() <= 1
    }
}

pub fn check_contiguity(units: &BTreeSet<UnitId>, graph: &AdjacencyGraph) -> ContiguityCheck {
    ContiguityCheck {
        components: connected_components(units, graph),
    }
}

/// Component that survives a split: the one holding the anchor (HQ),
/// otherwise the largest.
pub fn retained_component(components: &[BTreeSet<UnitId>], anchor: Option<&UnitId>) -> usize {
    anchor
        .and_then(|hq| components.iter().position(|c| c.contains(hq)))
        .unwrap_or(0)
}

/// One orphan moved during repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitMove {
    pub unit: UnitId,
    pub from: FormationId,
    pub to: Option<FormationId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub moves: Vec<UnitMove>,
}

impl RepairReport {
    pub fn changes(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Orphans that found no new holder
    pub fn dropped(&self) -> usize {
        self.moves.iter().filter(|m| m.to.is_none()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContiguityReport {
    pub formation_pass: RepairReport,
    pub corps_pass: RepairReport,
}

impl ContiguityReport {
    pub fn changes(&self) -> usize {
        self.formation_pass.changes() + self.corps_pass.changes()
    }
}

/// Orphans of a split set, in id order
fn orphans_of(components: Vec<BTreeSet<UnitId>>, keep: usize) -> BTreeSet<UnitId> {
    components
        .into_iter()
        .enumerate()
        .filter(|(index, _)| *index != keep)
        .flat_map(|(_, component)| component)
        .collect()
}

/// Formations of the same faction currently holding a neighbor of `unit`,
/// in neighbor id order
fn bordering_formations<'a>(
    unit: &UnitId,
    faction: &FactionId,
    assignment: &Assignment,
    roster: &'a Roster,
    graph: &AdjacencyGraph,
) -> Vec<&'a Formation> {
    graph
        .neighbors(unit)
        .iter()
        .filter_map(|neighbor| assignment.holder(neighbor))
        .filter_map(|id| roster.get(id))
        .filter(|f| f.is_active_brigade() && &f.faction == faction)
        .collect()
}

/// Split formations keep one component; orphans go to a bordering
/// brigade of the same corps, else any bordering brigade of the faction.
pub fn repair_formation_contiguity(
    assignment: &mut Assignment,
    roster: &Roster,
    graph: &AdjacencyGraph,
) -> RepairReport {
    let mut report = RepairReport::default();

    for formation in roster.iter() {
        let units = assignment.units_of(&formation.id);
        let check = check_contiguity(&units, graph);
        if check.is_contiguous() {
            continue;
        }

        let keep = retained_component(&check.components, formation.hq.as_ref());
        tracing::debug!(
            "Formation {} split into {} components, keeping {} units",
            formation.id,
            check.components.len(),
            check.components[keep].len()
        );

        for orphan in orphans_of(check.components, keep) {
            let bordering =
                bordering_formations(&orphan, &formation.faction, assignment, roster, graph);
            let target = bordering
                .iter()
                .find(|f| {
                    f.id != formation.id && formation.corps.is_some() && f.corps == formation.corps
                })
                .or_else(|| bordering.iter().find(|f| f.id != formation.id))
                .map(|f| f.id.clone());

            assignment.set(orphan.clone(), target.clone());
            report.moves.push(UnitMove {
                unit: orphan,
                from: formation.id.clone(),
                to: target,
            });
        }
    }

    report
}

/// Split corps keep one component (enclave units exempt); orphans go to a
/// bordering brigade of another corps, else unassigned.
pub fn repair_corps_contiguity(
    assignment: &mut Assignment,
    roster: &Roster,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    factions: &BTreeSet<FactionId>,
) -> RepairReport {
    let mut report = RepairReport::default();

    for faction in factions {
        let enclave_units = analyze_territory(faction, control, graph).enclave_units();
        let corps_ids: BTreeSet<FormationId> = roster
            .active_brigades(faction)
            .into_iter()
            .filter_map(|f| f.corps.clone())
            .collect();

        for corps in &corps_ids {
            let members: Vec<&FormationId> = roster
                .active_brigades(faction)
                .into_iter()
                .filter(|f| f.corps.as_ref() == Some(corps))
                .map(|f| &f.id)
                .collect();
            let units: BTreeSet<UnitId> = members
                .iter()
                .flat_map(|id| assignment.units_of(id))
                .filter(|unit| !enclave_units.contains(unit))
                .collect();

            let check = check_contiguity(&units, graph);
            if check.is_contiguous() {
                continue;
            }

            let keep = retained_component(&check.components, roster.corps_hq(corps));
            tracing::debug!(
                "Corps {} split into {} components, keeping {} units",
                corps,
                check.components.len(),
                check.components[keep].len()
            );

            for orphan in orphans_of(check.components, keep) {
                let Some(from) = assignment.holder(&orphan).cloned() else {
                    continue;
                };
                let target = bordering_formations(&orphan, faction, assignment, roster, graph)
                    .into_iter()
                    .find(|f| f.corps.as_ref() != Some(corps))
                    .map(|f| f.id.clone());

                assignment.set(orphan.clone(), target.clone());
                report.moves.push(UnitMove {
                    unit: orphan,
                    from,
                    to: target,
                });
            }
        }
    }

    report
}

/// Formation pass, then corps pass
pub fn enforce_contiguity(
    assignment: &mut Assignment,
    roster: &Roster,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    factions: &BTreeSet<FactionId>,
) -> ContiguityReport {
    let formation_pass = repair_formation_contiguity(assignment, roster, graph);
    let corps_pass = repair_corps_contiguity(assignment, roster, control, graph, factions);

    if formation_pass.changes() + corps_pass.changes() > 0 {
        tracing::debug!(
            "Contiguity repair moved {} units ({} left unassigned)",
            formation_pass.changes() + corps_pass.changes(),
            formation_pass.dropped() + corps_pass.dropped()
        );
    }

    ContiguityReport {
        formation_pass,
        corps_pass,
    }
}
