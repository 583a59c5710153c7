//! Turn step driver
//!
//! Runs the whole pipeline for one turn: front detection, per-faction
//! planning, unit-level derivation, contiguity repair and bot orders.
//! A pure function of its input; nothing carries over between turns.

pub mod input;
pub mod output;

pub use input::TurnInput;
pub use output::{TurnOutput, TurnSummary};

use crate::aor::{derive_assignment, enforce_contiguity, plan_faction, RegionAllocation};
use crate::bot::{generate_faction_orders, BotContext, PressureField};
use crate::core::config::EngineConfig;
use crate::territory::{expand_front, front_active_units};

pub fn run_turn(input: &TurnInput, config: &EngineConfig) -> TurnOutput {
    let theater = input.theater();
    let roster = input.roster();
    let control = &input.control;

    let front = front_active_units(control, &theater.graph);
    let expanded = expand_front(&front, control, &theater.graph, config.allocation.front_depth);
    tracing::debug!(
        "Turn {}: {} front-active units, {} after expansion",
        input.turn,
        front.len(),
        expanded.len()
    );

    let factions = input.faction_ids();
    let mut allocation = RegionAllocation::new();
    for faction in &factions {
        let plan = plan_faction(
            faction,
            control,
            &theater,
            &roster,
            &front,
            config.allocation.max_regions_per_formation,
        );
        allocation.merge(plan.allocation);
    }

    let mut assignment = derive_assignment(&allocation, &expanded, control, &theater, &roster);
    let repairs = enforce_contiguity(&mut assignment, &roster, control, &theater.graph, &factions);

    let pressure = PressureField::from_samples(&input.pressure);
    let ctx = BotContext {
        turn: input.turn,
        roster: &roster,
        assignment: &assignment,
        control,
        theater: &theater,
        pressure: &pressure,
        config,
    };
    let orders = input
        .bot_faction_ids()
        .iter()
        .map(|faction| generate_faction_orders(faction, &ctx))
        .collect();

    let output = TurnOutput {
        turn: input.turn,
        allocation,
        assignment,
        orders,
    };

    let summary = output.summary();
    tracing::info!(
        "Turn {} complete: {}/{} units assigned to {} brigades, {} repairs, \
         {} orders ({} posture, {} reshape, {} attack)",
        output.turn,
        summary.assigned_units,
        summary.units,
        summary.formations_with_ground,
        repairs.changes(),
        summary.posture_orders + summary.reshape_orders + summary.attack_orders,
        summary.posture_orders,
        summary.reshape_orders,
        summary.attack_orders
    );

    output
}
