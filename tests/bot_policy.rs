//! Integration tests for bot posture, reshape and attack orders over full turns

use std::collections::BTreeMap;

use frontline::bot::{CommandOrder, FactionStrategy, PressureSample};
use frontline::core::types::{Edge, FactionId, FormationId, RegionId, UnitId};
use frontline::forces::{Formation, Posture};
use frontline::territory::ControlSnapshot;
use frontline::turn::{run_turn, TurnInput, TurnOutput};
use frontline::EngineConfig;

fn unit(id: &str) -> UnitId {
    UnitId::new(id)
}

fn fid(id: &str) -> FormationId {
    FormationId::new(id)
}

/// RED a1..a4 (regions A1..A4) facing BLUE e1..e4 (regions E1..E4),
/// both lines connected internally
fn two_lines() -> TurnInput {
    let mut edges = Vec::new();
    let mut unit_regions = BTreeMap::new();
    let mut control = BTreeMap::new();

    for i in 1..=4 {
        let own = format!("a{}", i);
        let enemy = format!("e{}", i);
        if i > 1 {
            edges.push(Edge::new(format!("a{}", i - 1), own.clone()));
            edges.push(Edge::new(format!("e{}", i - 1), enemy.clone()));
        }
        edges.push(Edge::new(own.clone(), enemy.clone()));
        unit_regions.insert(unit(&own), RegionId::new(format!("A{}", i)));
        unit_regions.insert(unit(&enemy), RegionId::new(format!("E{}", i)));
        control.insert(unit(&own), Some(FactionId::new("RED")));
        control.insert(unit(&enemy), Some(FactionId::new("BLUE")));
    }

    TurnInput {
        turn: 4,
        bot_factions: vec![FactionId::new("RED"), FactionId::new("BLUE")],
        edges,
        unit_regions,
        control: ControlSnapshot::new(control),
        ..TurnInput::default()
    }
}

fn red_orders(output: &TurnOutput) -> &[CommandOrder] {
    output
        .orders
        .iter()
        .find(|batch| batch.faction == FactionId::new("RED"))
        .map(|batch| batch.orders.as_slice())
        .unwrap_or(&[])
}

/// Every attack target is hostile and borders the attacker's ground
fn assert_attacks_valid(input: &TurnInput, output: &TurnOutput) {
    let theater = input.theater();
    for batch in &output.orders {
        for (formation, target) in batch.attacks() {
            let owner = input.control.controller(target);
            assert!(owner.is_some() && owner != Some(&batch.faction), "{} is not hostile", target);

            let borders = output
                .assignment
                .units_of(formation)
                .iter()
                .any(|u| theater.graph.are_adjacent(u, target));
            assert!(borders, "{} does not border {}", target, formation);
        }
    }
}

#[test]
fn test_dense_defender_switches_to_preferred_offensive() {
    let mut input = two_lines();
    input.formations = vec![
        Formation::brigade("r1", "RED").with_corps("c1").with_hq("a1").with_personnel(2000),
        Formation::brigade("blue-1", "BLUE").with_corps("k1").with_hq("e1").with_personnel(300),
    ];

    let output = run_turn(&input, &EngineConfig::default());
    let orders = red_orders(&output);

    assert!(orders.contains(&CommandOrder::Posture {
        formation: fid("r1"),
        posture: Posture::Attack,
    }));
    // The pending posture makes r1 an attacker this same turn
    assert!(orders.iter().any(|o| {
        matches!(o, CommandOrder::Attack { formation, .. } if formation == &fid("r1"))
    }));
    assert_attacks_valid(&input, &output);
}

#[test]
fn test_preferred_offensive_comes_from_profile() {
    let mut input = two_lines();
    input.formations = vec![Formation::brigade("r1", "RED").with_hq("a1").with_personnel(2000)];

    let mut config = EngineConfig::default();
    config.factions.insert(
        FactionId::new("RED"),
        FactionStrategy {
            preferred_offensive: Posture::Probe,
            ..FactionStrategy::default()
        },
    );

    let output = run_turn(&input, &config);
    assert!(red_orders(&output).contains(&CommandOrder::Posture {
        formation: fid("r1"),
        posture: Posture::Probe,
    }));
}

#[test]
fn test_must_hold_brigade_stays_defending() {
    let mut input = two_lines();
    input.formations = vec![Formation::brigade("r1", "RED").with_hq("a1").with_personnel(2000)];

    let mut config = EngineConfig::default();
    let mut strategy = FactionStrategy::default();
    strategy.must_hold.insert(RegionId::new("A1"));
    config.factions.insert(FactionId::new("RED"), strategy);

    let output = run_turn(&input, &config);
    assert!(red_orders(&output).iter().all(|o| !o.is_posture() && !o.is_attack()));
}

#[test]
fn test_threatened_brigade_is_reinforced() {
    let mut input = two_lines();
    // r1 holds a1..a2, r2 holds a3..a4 (homes A1 and A4, no corps)
    input.formations = vec![
        Formation::brigade("r1", "RED").with_hq("a1").with_personnel(100),
        Formation::brigade("r2", "RED").with_hq("a4").with_personnel(600),
    ];
    input.pressure = vec![PressureSample::new("e2", "a2", 4.0)];

    let output = run_turn(&input, &EngineConfig::default());
    assert_eq!(output.assignment.units_of(&fid("r1")).len(), 1);
    assert_eq!(output.assignment.units_of(&fid("r2")).len(), 1);

    // Unattached brigades hold only their home region; a2 is unheld, so no brigade is threatened
    let reshapes: Vec<&CommandOrder> =
        red_orders(&output).iter().filter(|o| o.is_reshape()).collect();
    assert!(reshapes.is_empty());

    // With a corps the two brigades extend along a shared front and touch
    input.formations = vec![
        Formation::brigade("r1", "RED").with_corps("c1").with_hq("a1").with_personnel(100),
        Formation::brigade("r2", "RED").with_corps("c1").with_hq("a4").with_personnel(600),
    ];
    input.pressure = vec![PressureSample::new("a2", "e2", -4.0)];
    let output = run_turn(&input, &EngineConfig::default());

    assert_eq!(output.assignment.units_of(&fid("r2")).len(), 2);
    let reshapes: Vec<&CommandOrder> =
        red_orders(&output).iter().filter(|o| o.is_reshape()).collect();
    assert_eq!(
        reshapes,
        vec![&CommandOrder::Reshape {
            unit: unit("a3"),
            from: fid("r2"),
            to: fid("r1"),
        }]
    );
}

#[test]
fn test_orders_only_for_bot_factions() {
    let mut input = two_lines();
    input.bot_factions = vec![FactionId::new("BLUE")];
    input.formations = vec![Formation::brigade("r1", "RED").with_hq("a1").with_personnel(2000)];

    let output = run_turn(&input, &EngineConfig::default());
    assert_eq!(output.orders.len(), 1);
    assert_eq!(output.orders[0].faction, FactionId::new("BLUE"));
    assert!(output.orders[0].orders.is_empty());
}

#[test]
fn test_attack_targets_are_valid_across_mixed_roster() {
    let mut input = two_lines();
    input.formations = vec![
        Formation::brigade("r1", "RED")
            .with_corps("c1")
            .with_hq("a1")
            .with_posture(Posture::Attack),
        Formation::brigade("r2", "RED")
            .with_corps("c1")
            .with_hq("a4")
            .with_posture(Posture::Probe),
        Formation::brigade("b1", "BLUE")
            .with_corps("k1")
            .with_hq("e2")
            .with_posture(Posture::Attack),
        Formation::brigade("b2", "BLUE").with_hq("e4").with_personnel(50),
    ];

    let output = run_turn(&input, &EngineConfig::default());
    assert!(output.orders.iter().any(|batch| batch.attacks().count() > 0));
    assert_attacks_valid(&input, &output);
}
