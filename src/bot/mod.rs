//! Autonomous command policy for computer-controlled factions
//!
//! Reads the validated assignment and emits, per faction and turn, posture
//! changes, one-unit reshape transfers and attack targets. Every decision
//! iterates brigades, adjacencies and units in id order.

pub mod orders;
pub mod posture;
pub mod reshape;
pub mod state;
pub mod strategy;
pub mod targeting;

pub use orders::{CommandOrder, FactionOrders};
pub use posture::{can_adopt_posture, decide_posture, posture_orders};
pub use reshape::{
    reshape_orders, threatened_fronts, validate_reshape_order, PressureField, PressureSample,
};
pub use state::{brigade_states, density, formation_densities, BrigadeState};
pub use strategy::FactionStrategy;
pub use targeting::{attack_targets, score_target, select_attack_target, TargetContext};

use crate::aor::Assignment;
use crate::core::config::EngineConfig;
use crate::core::types::{FactionId, Turn};
use crate::forces::Roster;
use crate::graph::Theater;
use crate::territory::ControlSnapshot;

/// Read-only view of the turn the bot decides on
pub struct BotContext<'a> {
    pub turn: Turn,
    pub roster: &'a Roster,
    pub assignment: &'a Assignment,
    pub control: &'a ControlSnapshot,
    pub theater: &'a Theater,
    pub pressure: &'a PressureField,
    pub config: &'a EngineConfig,
}

/// All orders of one bot faction for this turn
pub fn generate_faction_orders(faction: &FactionId, ctx: &BotContext) -> FactionOrders {
    let strategy = ctx.config.strategy(faction);
    let policy = &ctx.config.policy;
    let states = brigade_states(faction, ctx.roster, ctx.assignment, ctx.control, ctx.theater);
    let mut batch = FactionOrders::new(faction.clone(), ctx.turn);

    let pending = posture_orders(&states, &strategy, policy);
    for (formation, posture) in &pending {
        batch.orders.push(CommandOrder::Posture {
            formation: formation.clone(),
            posture: *posture,
        });
    }

    let threats = threatened_fronts(
        faction,
        ctx.assignment,
        ctx.control,
        &ctx.theater.graph,
        ctx.pressure,
        policy.pressure_imbalance_margin,
    );
    batch
        .orders
        .extend(reshape_orders(&threats, &states, &ctx.theater.graph, policy));

    let densities = formation_densities(ctx.assignment, ctx.roster);
    let targeting = TargetContext {
        faction,
        control: ctx.control,
        theater: ctx.theater,
        assignment: ctx.assignment,
        densities: &densities,
        strategy: &strategy,
        scoring: &policy.scoring,
    };
    let attacks = attack_targets(
        &states,
        &pending,
        &targeting,
        policy.exclusive_attack_targets,
    );
    for (formation, target) in attacks {
        batch.orders.push(CommandOrder::Attack { formation, target });
    }

    tracing::debug!(
        "Faction {} turn {}: {} posture, {} reshape, {} attack orders ({} threatened adjacencies)",
        faction,
        ctx.turn,
        batch.count(CommandOrder::is_posture),
        batch.count(CommandOrder::is_reshape),
        batch.count(CommandOrder::is_attack),
        threats.len()
    );

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Edge, FormationId, RegionId, UnitId};
    use crate::forces::{Formation, Posture};
    use std::collections::BTreeMap;

    fn unit(id: &str) -> UnitId {
        UnitId::new(id)
    }

    /// RED a1, a2 facing BLUE e1 (held by blue brigade) and e2 (unheld)
    fn setup() -> (Theater, ControlSnapshot, Assignment) {
        let edges = vec![
            Edge::new("a1", "a2"),
            Edge::new("a1", "e1"),
            Edge::new("a2", "e2"),
            Edge::new("a1", "e2"),
        ];
        let regions: BTreeMap<UnitId, RegionId> = [
            ("a1", "RA"),
            ("a2", "RA"),
            ("e1", "RE"),
            ("e2", "RE"),
        ]
        .into_iter()
        .map(|(u, r)| (unit(u), RegionId::new(r)))
        .collect();
        let control = [("a1", "RED"), ("a2", "RED"), ("e1", "BLUE"), ("e2", "BLUE")]
            .into_iter()
            .map(|(u, f)| (unit(u), Some(FactionId::new(f))))
            .collect();
        let mut assignment = Assignment::default();
        assignment.set(unit("a1"), Some(FormationId::new("r1")));
        assignment.set(unit("a2"), Some(FormationId::new("r2")));
        assignment.set(unit("e1"), Some(FormationId::new("x1")));
        assignment.set(unit("e2"), None);
        (Theater::new(&edges, regions), control, assignment)
    }

    #[test]
    fn test_orders_grouped_by_kind() {
        let (theater, control, assignment) = setup();
        let roster = Roster::new(vec![
            Formation::brigade("r1", "RED").with_personnel(400),
            Formation::brigade("r2", "RED").with_personnel(40),
            Formation::brigade("x1", "BLUE").with_personnel(500),
        ]);
        let config = EngineConfig::default();
        let pressure = PressureField::default();
        let ctx = BotContext {
            turn: 7,
            roster: &roster,
            assignment: &assignment,
            control: &control,
            theater: &theater,
            pressure: &pressure,
            config: &config,
        };

        let batch = generate_faction_orders(&FactionId::new("RED"), &ctx);
        assert_eq!(batch.turn, 7);
        assert_eq!(
            batch.orders,
            vec![
                CommandOrder::Posture {
                    formation: FormationId::new("r1"),
                    posture: Posture::Attack,
                },
                CommandOrder::Posture {
                    formation: FormationId::new("r2"),
                    posture: Posture::ElasticDefense,
                },
                // e2 is unheld, so it outscores the garrisoned e1
                CommandOrder::Attack {
                    formation: FormationId::new("r1"),
                    target: unit("e2"),
                },
            ]
        );
    }

    #[test]
    fn test_exclusive_targets_spread_attackers() {
        let (theater, control, assignment) = setup();
        let roster = Roster::new(vec![
            Formation::brigade("r1", "RED").with_posture(Posture::Attack),
            Formation::brigade("r2", "RED").with_posture(Posture::Probe),
            Formation::brigade("x1", "BLUE").with_personnel(500),
        ]);
        let mut config = EngineConfig::default();
        config.policy.exclusive_attack_targets = false;
        config.factions.insert(
            FactionId::new("RED"),
            FactionStrategy {
                max_offensive_share: 1.0,
                ..FactionStrategy::default()
            },
        );
        let pressure = PressureField::default();
        let ctx = BotContext {
            turn: 1,
            roster: &roster,
            assignment: &assignment,
            control: &control,
            theater: &theater,
            pressure: &pressure,
            config: &config,
        };

        let shared = generate_faction_orders(&FactionId::new("RED"), &ctx);
        let targets: Vec<(&str, &str)> = shared
            .attacks()
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        assert_eq!(targets, vec![("r1", "e2"), ("r2", "e2")]);

        config.policy.exclusive_attack_targets = true;
        let ctx = BotContext {
            turn: 1,
            roster: &roster,
            assignment: &assignment,
            control: &control,
            theater: &theater,
            pressure: &pressure,
            config: &config,
        };
        let exclusive = generate_faction_orders(&FactionId::new("RED"), &ctx);
        let targets: Vec<(&str, &str)> = exclusive
            .attacks()
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        // r2 only borders e2, which r1 already took
        assert_eq!(targets, vec![("r1", "e2")]);
    }
}
