//! End-to-end decision scenarios over fixture arenas.

use std::time::{Duration, Instant};

use bomber_core::prelude::*;
use bomber_test_utils::fixtures::ArenaBuilder;

fn engine_rng() -> ExploreRng {
    ExploreRng::new(99)
}

#[test]
fn escape_fires_before_attack_when_threatened() {
    // Bot at (5,5), bomb with a 1-tick fuse at (5,6), enemy at (5,3).
    let arena = ArenaBuilder::new(13, 11)
        .bomb(5, 6, 1)
        .combatant("bot", 5, 5)
        .combatant("enemy", 5, 3)
        .build();

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Escaping);
    assert_ne!(decision.action, Action::PlaceBomb);
    let Action::Move { direction, .. } = decision.action else {
        panic!("expected a flee move, got {:?}", decision.action);
    };
    assert_ne!(direction, Direction::Up, "fled toward the bomb");
}

#[test]
fn adjacent_enemy_with_reachable_safety_gets_bombed() {
    // Bot at (4,4), enemy at (4,5), open ground toward (2,4).
    let arena = ArenaBuilder::new(13, 11)
        .combatant("bot", 4, 4)
        .combatant("enemy", 4, 5)
        .build();

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Attacking);
    assert_eq!(decision.action, Action::PlaceBomb);
}

#[test]
fn box_farming_bombs_or_moves_but_never_stalls() {
    // No threats, no enemy in range, one box adjacent to the bot.
    let arena = ArenaBuilder::new(13, 11)
        .bordered()
        .box_at(5, 5)
        .combatant("bot", 4, 5)
        .build();

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Collecting);
    assert_eq!(decision.action, Action::PlaceBomb);
}

#[test]
fn box_farming_walks_in_before_bombing() {
    let arena = ArenaBuilder::new(13, 11)
        .bordered()
        .box_at(9, 5)
        .combatant("bot", 2, 5)
        .build();

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Collecting);
    let Action::Move { direction, steps } = decision.action else {
        panic!("expected an approach move, got {:?}", decision.action);
    };
    assert_eq!(direction, Direction::Right);
    assert!(steps >= 1 && steps <= MAX_RUN_LENGTH);
}

#[test]
fn move_steps_never_overrun_the_computed_path() {
    // Straight open corridor: the path is long, the commitment is capped.
    let arena = ArenaBuilder::new(13, 11)
        .bordered()
        .combatant("bot", 1, 1)
        .combatant("enemy", 11, 1)
        .build();

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Hunting);
    let Action::Move { direction, steps } = decision.action else {
        panic!("expected a hunting move, got {:?}", decision.action);
    };
    assert!(steps <= MAX_RUN_LENGTH);
    // Every committed cell must be walkable and unoccupied; in particular
    // the move may not end on the enemy.
    let mut committed = Position::new(1, 1);
    for _ in 0..steps {
        committed = committed.step(direction);
        assert!(arena.is_walkable(committed), "committed to {committed:?}");
        assert!(!arena.is_occupied(committed), "committed onto {committed:?}");
    }
}

#[test]
fn session_rate_limits_then_recovers() {
    let arena = ArenaBuilder::new(13, 11)
        .bordered()
        .combatant("bot", 5, 5)
        .build();
    let mut session = Session::new(CombatantId::from("bot"), 7);

    let t0 = Instant::now();
    let first = session.decide_at(&arena, t0);
    assert!(matches!(first, Action::Move { .. }));

    let inside_window = session.decide_at(&arena, t0 + DECISION_COOLDOWN / 2);
    assert_eq!(inside_window, Action::Wait);

    let past_window = session.decide_at(&arena, t0 + DECISION_COOLDOWN * 2);
    assert!(matches!(past_window, Action::Move { .. }));
}

#[test]
fn wire_snapshot_drives_a_full_decision() {
    // A 5x4 arena as the polling collaborator would deliver it: the bot
    // stands beside a box with open ground behind it.
    let json = r#"{
        "id": 3,
        "width": 5,
        "height": 4,
        "cells": [
            {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"},
            {"type": "empty"}, {"type": "empty"}, {"type": "box"},   {"type": "empty"}, {"type": "empty"},
            {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"},
            {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"}, {"type": "empty"}
        ],
        "players": [
            {"x": 1, "y": 1, "health": 100, "address": "bot", "facing": "right"}
        ],
        "gameState": {"state": "active"},
        "tickCount": 12
    }"#;

    let arena = serde_json::from_str::<WireGame>(json)
        .unwrap()
        .into_arena()
        .unwrap();
    assert_eq!(arena.status, ArenaStatus::Active);

    let decision = decide(&arena, &CombatantId::from("bot"), &mut engine_rng()).unwrap();
    assert_eq!(decision.mode, Mode::Collecting);
    assert_eq!(decision.action, Action::PlaceBomb);
}
