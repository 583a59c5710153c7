//! Posture decisions
//!
//! An ordered rule table picks a target posture for each brigade; the
//! first matching rule wins. An order is only issued when the target
//! differs from the current posture and the brigade is able to adopt it.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::bot::state::BrigadeState;
use crate::bot::strategy::FactionStrategy;
use crate::core::config::PolicyConfig;
use crate::core::types::FormationId;
use crate::forces::{Formation, Posture, Readiness};

/// Minimum cohesion needed to hold a posture
pub fn min_cohesion(posture: Posture) -> u32 {
    match posture {
        Posture::Defend | Posture::ElasticDefense => 0,
        Posture::Probe => 20,
        Posture::Attack => 40,
    }
}

pub fn readiness_allows(posture: Posture, readiness: Readiness) -> bool {
    match posture {
        Posture::Defend => true,
        Posture::ElasticDefense => matches!(
            readiness,
            Readiness::Active | Readiness::Overextended | Readiness::Degraded
        ),
        Posture::Probe => matches!(readiness, Readiness::Active | Readiness::Overextended),
        Posture::Attack => readiness == Readiness::Active,
    }
}

pub fn can_adopt_posture(formation: &Formation, posture: Posture) -> bool {
    formation.cohesion >= min_cohesion(posture) && readiness_allows(posture, formation.readiness)
}

/// Target posture from the rule table, `None` when no rule applies
pub fn decide_posture(
    state: &BrigadeState,
    strategy: &FactionStrategy,
    policy: &PolicyConfig,
    offensive_count: usize,
    cap: usize,
) -> Option<Posture> {
    if !state.front_contact {
        return Some(Posture::Defend);
    }
    if state.zone_regions().any(|r| strategy.is_defensive_zone(r)) {
        return Some(Posture::Defend);
    }

    let defending = state.formation.posture == Posture::Defend;
    let room = offensive_count < cap;

    if defending && room && state.density >= strategy.overstaffed_density {
        return Some(strategy.preferred_offensive);
    }
    if defending
        && room
        && state.density >= policy.understaffed_density
        && state.zone_regions().any(|r| strategy.is_offensive_zone(r))
    {
        return Some(Posture::Probe);
    }
    if state.density < policy.understaffed_density {
        return Some(Posture::ElasticDefense);
    }
    None
}

/// Posture in effect once this turn's orders apply
fn effective_posture(orders: &BTreeMap<FormationId, Posture>, state: &BrigadeState) -> Posture {
    orders.get(state.id()).copied().unwrap_or(state.formation.posture)
}

/// Record `posture` for a brigade, dropping the order when it is a no-op
fn set_order(orders: &mut BTreeMap<FormationId, Posture>, state: &BrigadeState, posture: Posture) {
    if state.formation.posture == posture {
        orders.remove(state.id());
    } else {
        orders.insert(state.id().clone(), posture);
    }
}

/// Defending front brigades outside defensive zones able to take `posture`
fn front_defenders<'s, 'a>(
    states: &'s [BrigadeState<'a>],
    orders: &BTreeMap<FormationId, Posture>,
    strategy: &FactionStrategy,
    posture: Posture,
) -> Vec<&'s BrigadeState<'a>> {
    states
        .iter()
        .filter(|s| s.front_contact)
        .filter(|s| effective_posture(orders, s) == Posture::Defend)
        .filter(|s| !s.zone_regions().any(|r| strategy.is_defensive_zone(r)))
        .filter(|s| can_adopt_posture(s.formation, posture))
        .collect()
}

/// Posture changes for a faction's brigades, keyed by formation id
pub fn posture_orders(
    states: &[BrigadeState],
    strategy: &FactionStrategy,
    policy: &PolicyConfig,
) -> BTreeMap<FormationId, Posture> {
    let cap = strategy.offensive_cap(states.len());
    let mut offensive = states
        .iter()
        .filter(|s| s.formation.posture.is_offensive())
        .count();
    let mut orders: BTreeMap<FormationId, Posture> = BTreeMap::new();

    for state in states {
        let Some(target) = decide_posture(state, strategy, policy, offensive, cap) else {
            continue;
        };
        let current = state.formation.posture;
        if target == current || !can_adopt_posture(state.formation, target) {
            continue;
        }
        match (current.is_offensive(), target.is_offensive()) {
            (false, true) => offensive += 1,
            (true, false) => offensive = offensive.saturating_sub(1),
            _ => {}
        }
        orders.insert(state.id().clone(), target);
    }

    // Minimum offensive presence: densest defenders probe
    if offensive < strategy.min_offensive_formations {
        let mut reserves = front_defenders(states, &orders, strategy, Posture::Probe);
        reserves.sort_by(|a, b| {
            OrderedFloat(b.density)
                .cmp(&OrderedFloat(a.density))
                .then_with(|| a.id().cmp(b.id()))
        });

        for state in reserves {
            if offensive >= strategy.min_offensive_formations {
                break;
            }
            set_order(&mut orders, state, Posture::Probe);
            offensive += 1;
        }
    }

    // Economy of force: while anything attacks, the thinnest quiet defenders go elastic
    let mut elastic = states
        .iter()
        .filter(|s| effective_posture(&orders, s) == Posture::ElasticDefense)
        .count();
    if offensive > 0 && elastic < policy.max_elastic_defense {
        let mut quiet = front_defenders(states, &orders, strategy, Posture::ElasticDefense);
        quiet.sort_by(|a, b| {
            OrderedFloat(a.density)
                .cmp(&OrderedFloat(b.density))
                .then_with(|| a.id().cmp(b.id()))
        });

        for state in quiet {
            if elastic >= policy.max_elastic_defense {
                break;
            }
            set_order(&mut orders, state, Posture::ElasticDefense);
            elastic += 1;
        }
    }

    orders
}
