//! Reshape (reinforcement) orders
//!
//! Adjacencies where enemy pressure outweighs ours by more than the
//! configured margin are reinforced by moving one unit from a bordering
//! brigade with personnel to spare.

use std::collections::{BTreeMap, BTreeSet};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::aor::Assignment;
use crate::bot::orders::CommandOrder;
use crate::bot::state::BrigadeState;
use crate::core::config::PolicyConfig;
use crate::core::types::{adjacency_key, FactionId, FormationId, UnitId};
use crate::forces::Roster;
use crate::graph::AdjacencyGraph;
use crate::territory::ControlSnapshot;

/// Signed pressure on one adjacency: `value = pressure(a) - pressure(b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureSample {
    pub a: UnitId,
    pub b: UnitId,
    pub value: f32,
}

impl PressureSample {
    pub fn new(a: impl Into<String>, b: impl Into<String>, value: f32) -> Self {
        Self {
            a: UnitId::new(a),
            b: UnitId::new(b),
            value,
        }
    }
}

/// Pressure samples keyed by normalized endpoints (`a < b`)
#[derive(Debug, Clone, Default)]
pub struct PressureField {
    values: BTreeMap<(UnitId, UnitId), f32>,
}

impl PressureField {
    /// Samples with `a > b` are flipped and negated; later samples win
    pub fn from_samples(samples: &[PressureSample]) -> Self {
        let mut values = BTreeMap::new();
        for sample in samples {
            if sample.a <= sample.b {
                values.insert((sample.a.clone(), sample.b.clone()), sample.value);
            } else {
                values.insert((sample.b.clone(), sample.a.clone()), -sample.value);
            }
        }
        Self { values }
    }

    /// How far pressure from `enemy`'s side exceeds pressure from `own`'s side
    pub fn enemy_advantage(&self, own: &UnitId, enemy: &UnitId) -> f32 {
        if own < enemy {
            self.values.get(&(own.clone(), enemy.clone())).map(|v| -v).unwrap_or(0.0)
        } else {
            self.values.get(&(enemy.clone(), own.clone())).copied().unwrap_or(0.0)
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An adjacency where the enemy has the upper hand
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatenedFront {
    pub key: String,
    pub own_unit: UnitId,
    pub enemy_unit: UnitId,
    pub formation: FormationId,
    pub advantage: f32,
}

/// Threatened front adjacencies of a faction, worst first
pub fn threatened_fronts(
    faction: &FactionId,
    assignment: &Assignment,
    control: &ControlSnapshot,
    graph: &AdjacencyGraph,
    pressure: &PressureField,
    margin: f32,
) -> Vec<ThreatenedFront> {
    let mut threats: Vec<ThreatenedFront> = graph
        .edges()
        .filter(|(a, b)| control.is_hostile_pair(a, b))
        .filter_map(|(a, b)| {
            let (own, enemy) = if control.is_controlled_by(a, faction) {
                (a, b)
            } else if control.is_controlled_by(b, faction) {
                (b, a)
            } else {
                return None;
            };
            let formation = assignment.holder(own)?.clone();
            let advantage = pressure.enemy_advantage(own, enemy);
            (advantage > margin).then(|| ThreatenedFront {
                key: adjacency_key(own, enemy),
                own_unit: own.clone(),
                enemy_unit: enemy.clone(),
                formation,
                advantage,
            })
        })
        .collect();

    threats.sort_by(|x, y| {
        OrderedFloat(y.advantage)
            .cmp(&OrderedFloat(x.advantage))
            .then_with(|| x.key.cmp(&y.key))
    });
    threats
}

/// One-unit transfers toward threatened brigades, capped per faction
pub fn reshape_orders(
    threats: &[ThreatenedFront],
    states: &[BrigadeState],
    graph: &AdjacencyGraph,
    policy: &PolicyConfig,
) -> Vec<CommandOrder> {
    let by_id: BTreeMap<&FormationId, &BrigadeState> = states.iter().map(|s| (s.id(), s)).collect();
    let mut used: BTreeSet<FormationId> = BTreeSet::new();
    let mut orders = Vec::new();

    for threat in threats {
        if orders.len() >= policy.max_reshape_orders {
            break;
        }
        let Some(receiver) = by_id.get(&threat.formation) else {
            continue;
        };

        let mut best: Option<(&BrigadeState, &UnitId)> = None;
        for donor in states {
            if donor.id() == receiver.id()
                || used.contains(donor.id())
                || donor.units.len() <= 1
                || donor.density < policy.surplus_density
            {
                continue;
            }
            let candidate = donor.units.iter().find(|unit| {
                graph
                    .neighbors(unit)
                    .iter()
                    .any(|neighbor| receiver.units.contains(neighbor))
            });
            let Some(unit) = candidate else {
                continue;
            };
            if best.map_or(true, |(current, _)| donor.density > current.density) {
                best = Some((donor, unit));
            }
        }

        if let Some((donor, unit)) = best {
            tracing::debug!(
                "Reshape: {} sends {} to {} (enemy advantage {:.2} on {})",
                donor.id(),
                unit,
                receiver.id(),
                threat.advantage,
                threat.key
            );
            used.insert(donor.id().clone());
            orders.push(CommandOrder::Reshape {
                unit: unit.clone(),
                from: donor.id().clone(),
                to: receiver.id().clone(),
            });
        }
    }

    orders
}

/// Check a reshape order against the current assignment.
///
/// The unit must belong to the donor, both brigades must be active and on
/// the same side, the unit must border the receiver, and the donor must
/// keep at least one unit.
pub fn validate_reshape_order(
    unit: &UnitId,
    from: &FormationId,
    to: &FormationId,
    assignment: &Assignment,
    roster: &Roster,
    graph: &AdjacencyGraph,
) -> bool {
    let (Some(donor), Some(receiver)) = (roster.get(from), roster.get(to)) else {
        return false;
    };
    if from == to
        || !donor.is_active_brigade()
        || !receiver.is_active_brigade()
        || donor.faction != receiver.faction
    {
        return false;
    }
    if assignment.holder(unit) != Some(from) {
        return false;
    }
    if assignment.units_of(from).len() <= 1 {
        return false;
    }
    graph
        .neighbors(unit)
        .iter()
        .any(|neighbor| assignment.holder(neighbor) == Some(to))
}
