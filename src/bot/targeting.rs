//! Attack target selection
//!
//! Brigades in an offensive posture pick one hostile unit bordering their
//! area of responsibility. Targets are scored in integer points; the
//! highest score wins and ties go to the lowest unit id.

use std::collections::{BTreeMap, BTreeSet};

use crate::aor::Assignment;
use crate::bot::state::BrigadeState;
use crate::bot::strategy::FactionStrategy;
use crate::core::config::ScoringConfig;
use crate::core::types::{FactionId, FormationId, RegionId, UnitId};
use crate::forces::Posture;
use crate::graph::Theater;
use crate::territory::ControlSnapshot;

/// Defender strength of a unit: its holder's density, 0 when unheld
pub fn garrison(
    unit: &UnitId,
    assignment: &Assignment,
    densities: &BTreeMap<FormationId, f32>,
) -> f32 {
    assignment
        .holder(unit)
        .and_then(|holder| densities.get(holder))
        .copied()
        .unwrap_or(0.0)
}

/// Hostile-controlled units adjacent to any of `units`
pub fn hostile_neighbors(
    units: &BTreeSet<UnitId>,
    faction: &FactionId,
    control: &ControlSnapshot,
    theater: &Theater,
) -> BTreeSet<UnitId> {
    units
        .iter()
        .flat_map(|unit| theater.graph.neighbors(unit))
        .filter(|neighbor| control.controller(neighbor).is_some_and(|owner| owner != faction))
        .cloned()
        .collect()
}

pub fn score_target(
    target_region: Option<&RegionId>,
    garrison: f32,
    home_region: Option<&RegionId>,
    strategy: &FactionStrategy,
    scoring: &ScoringConfig,
) -> i64 {
    let mut score = 0;

    if garrison <= 0.0 {
        score += scoring.undefended;
    } else if garrison < scoring.garrison_weakness_threshold {
        let weakness = 1.0 - garrison / scoring.garrison_weakness_threshold;
        score += (scoring.weak_garrison_max as f32 * weakness).round() as i64;
    }

    if let Some(region) = target_region {
        if strategy.corridor_priority.contains(region) {
            score += scoring.corridor_priority;
        }
        if strategy.strategic_offensive.contains(region) {
            score += scoring.strategic_offensive;
        }
        if home_region == Some(region) {
            score += scoring.home_region;
        }
    }

    score
}

pub struct TargetContext<'a> {
    pub faction: &'a FactionId,
    pub control: &'a ControlSnapshot,
    pub theater: &'a Theater,
    pub assignment: &'a Assignment,
    pub densities: &'a BTreeMap<FormationId, f32>,
    pub strategy: &'a FactionStrategy,
    pub scoring: &'a ScoringConfig,
}

/// Best target for one brigade, skipping `taken` units
pub fn select_attack_target(
    state: &BrigadeState,
    ctx: &TargetContext,
    taken: &BTreeSet<UnitId>,
) -> Option<UnitId> {
    let mut best: Option<(i64, &UnitId)> = None;
    let candidates = hostile_neighbors(&state.units, ctx.faction, ctx.control, ctx.theater);

    for target in candidates.iter().filter(|t| !taken.contains(*t)) {
        let score = score_target(
            ctx.theater.regions.region_of(target),
            garrison(target, ctx.assignment, ctx.densities),
            state.home_region.as_ref(),
            ctx.strategy,
            ctx.scoring,
        );
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, target));
        }
    }

    best.map(|(_, target)| target.clone())
}

/// One attack order per brigade whose effective posture is offensive
pub fn attack_targets(
    states: &[BrigadeState],
    pending: &BTreeMap<FormationId, Posture>,
    ctx: &TargetContext,
    exclusive: bool,
) -> Vec<(FormationId, UnitId)> {
    let mut taken: BTreeSet<UnitId> = BTreeSet::new();
    let mut picks = Vec::new();

    for state in states {
        let posture = pending.get(state.id()).copied().unwrap_or(state.formation.posture);
        if !posture.is_offensive() {
            continue;
        }
        if let Some(target) = select_attack_target(state, ctx, &taken) {
            if exclusive {
                taken.insert(target.clone());
            }
            picks.push((state.id().clone(), target));
        }
    }

    picks
}
