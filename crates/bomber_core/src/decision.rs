//! Priority decision engine.
//!
//! Every invocation re-evaluates from scratch against the current
//! snapshot; there is no transition table. The reported [`Mode`] is a
//! classification of which branch fired, not a controller of behavior.
//!
//! Priority order, each check short-circuiting the rest:
//! escape, attack, collect, hunt, explore.

use serde::{Deserialize, Serialize};

use crate::action::{path_to_action, Action};
use crate::arena::{Arena, Cell, CombatantId, Direction, Position};
use crate::{search, threat};

/// Manhattan distance at which an enemy is engaged rather than hunted.
pub const ATTACK_RANGE: u32 = 3;

/// Behavioral classification of the branch that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No threat, no target; exploring.
    #[default]
    Idle,
    /// Closing on an enemy beyond attack range.
    Hunting,
    /// Fleeing an imminent blast.
    Escaping,
    /// Engaging an enemy within attack range.
    Attacking,
    /// Farming destructible boxes.
    Collecting,
}

/// One engine invocation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The action to execute.
    pub action: Action,
    /// Which branch fired.
    pub mode: Mode,
}

/// Seeded PRNG driving exploration.
///
/// Deliberately tiny and deterministic so exploration is reproducible
/// under test while remaining unbiased in production. Same construction
/// as other deterministic generators in this workspace.
#[derive(Debug, Clone)]
pub struct ExploreRng {
    state: u64,
}

impl ExploreRng {
    /// Create a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5DEE_CE66D).wrapping_add(11);
        self.state
    }

    /// Fisher-Yates permutation of the four cardinal directions.
    pub fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        for i in (1..directions.len()).rev() {
            let j = (self.next() % (i as u64 + 1)) as usize;
            directions.swap(i, j);
        }
        directions
    }
}

/// Compute one decision for the combatant `id` against `arena`.
///
/// Returns `None` when the agent is missing from the snapshot or already
/// eliminated; the session translates that into [`Action::Wait`] without
/// touching its reported mode.
#[must_use]
pub fn decide(arena: &Arena, id: &CombatantId, rng: &mut ExploreRng) -> Option<Decision> {
    let me = arena.combatant(id)?;
    if !me.is_alive() {
        return None;
    }
    let my_pos = me.position;

    // Priority 1: escape imminent blasts.
    if threat::is_imminent_danger(arena, my_pos) {
        tracing::debug!(agent = %id, ?my_pos, "in imminent danger, escaping");
        return Some(Decision {
            action: escape(arena, my_pos, rng),
            mode: Mode::Escaping,
        });
    }

    // Priority 2: engage a nearby enemy.
    let enemy = nearest_enemy(arena, id, my_pos);
    if let Some(enemy_pos) = enemy {
        if my_pos.manhattan_distance(enemy_pos) <= ATTACK_RANGE {
            return Some(Decision {
                action: attack(arena, my_pos, enemy_pos, rng),
                mode: Mode::Attacking,
            });
        }
    }

    // Priority 3: farm destructible boxes for power-ups.
    let staging = search::find_nearest_adjacent(arena, my_pos, |p| {
        matches!(arena.grid.cell(p), Some(Cell::Box))
    });
    if let Some(staging_pos) = staging {
        return Some(Decision {
            action: farm(arena, my_pos, staging_pos),
            mode: Mode::Collecting,
        });
    }

    // Priority 4: hunt a distant enemy.
    if let Some(enemy_pos) = enemy {
        return Some(Decision {
            action: hunt(arena, my_pos, enemy_pos, rng),
            mode: Mode::Hunting,
        });
    }

    // Default: random exploration.
    Some(Decision {
        action: explore(arena, my_pos, rng),
        mode: Mode::Idle,
    })
}

/// Nearest living enemy by Manhattan distance. Ties resolve to the
/// earliest combatant in snapshot order.
fn nearest_enemy(arena: &Arena, id: &CombatantId, from: Position) -> Option<Position> {
    let mut nearest: Option<(u32, Position)> = None;
    for combatant in arena.living_combatants() {
        if &combatant.id == id {
            continue;
        }
        let distance = from.manhattan_distance(combatant.position);
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, combatant.position));
        }
    }
    nearest.map(|(_, pos)| pos)
}

/// Flee to the nearest safe cell, ignoring threat along the way.
fn escape(arena: &Arena, my_pos: Position, rng: &mut ExploreRng) -> Action {
    let Some(safe) = search::find_nearest_safe(arena, my_pos) else {
        // Nowhere is safe; moving somewhere beats standing on the blast.
        return explore(arena, my_pos, rng);
    };
    let path = search::find_path(arena, my_pos, safe, false);
    if path.len() <= 1 {
        return Action::Wait;
    }
    path_to_action(&path)
}

/// Engage an enemy in range: bomb when adjacent and a retreat exists,
/// otherwise close the distance.
fn attack(arena: &Arena, my_pos: Position, enemy_pos: Position, rng: &mut ExploreRng) -> Action {
    if my_pos.manhattan_distance(enemy_pos) <= 1
        && search::find_nearest_safe(arena, my_pos).is_some()
    {
        // The retreat existence check prevents suicidal bombing.
        return Action::PlaceBomb;
    }
    hunt(arena, my_pos, enemy_pos, rng)
}

/// Move toward an enemy along a threat-avoiding path.
fn hunt(arena: &Arena, my_pos: Position, enemy_pos: Position, rng: &mut ExploreRng) -> Action {
    let mut path = search::find_path(arena, my_pos, enemy_pos, true);
    // The goal is the enemy's own cell, which the search lets a path end
    // on. The agent stops on the cell before it; a move must only commit
    // to unoccupied cells.
    if path.last() == Some(&enemy_pos) {
        path.pop();
    }
    if path.len() <= 1 {
        return explore(arena, my_pos, rng);
    }
    path_to_action(&path)
}

/// Bomb an adjacent box when a retreat exists, otherwise move toward the
/// staging cell found by the box search.
fn farm(arena: &Arena, my_pos: Position, staging_pos: Position) -> Action {
    let beside_box = Direction::ALL
        .iter()
        .any(|&dir| matches!(arena.grid.cell(my_pos.step(dir)), Some(Cell::Box)));
    if beside_box && search::find_nearest_safe(arena, my_pos).is_some() {
        return Action::PlaceBomb;
    }
    let path = search::find_path(arena, my_pos, staging_pos, true);
    if path.len() <= 1 {
        return Action::Wait;
    }
    path_to_action(&path)
}

/// Move one step in a random open direction, or wait when boxed in.
fn explore(arena: &Arena, my_pos: Position, rng: &mut ExploreRng) -> Action {
    for direction in rng.shuffled_directions() {
        let next = my_pos.step(direction);
        if arena.is_walkable(next) && !arena.is_occupied(next) {
            return Action::Move { direction, steps: 1 };
        }
    }
    Action::Wait
}

#[cfg(test)]
mod tests {
    use bomber_core::action::Action;
    use bomber_core::arena::{CombatantId, Direction, Position};
    use bomber_core::decision::{decide, ExploreRng, Mode};
    use bomber_test_utils::fixtures::ArenaBuilder;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn rng() -> ExploreRng {
        ExploreRng::new(42)
    }

    #[test]
    fn test_missing_agent_yields_none() {
        let arena = ArenaBuilder::new(9, 9).build();
        assert!(decide(&arena, &CombatantId::from("ghost"), &mut rng()).is_none());
    }

    #[test]
    fn test_dead_agent_yields_none() {
        let arena = ArenaBuilder::new(9, 9).dead_combatant("bot", 4, 4).build();
        assert!(decide(&arena, &CombatantId::from("bot"), &mut rng()).is_none());
    }

    #[test]
    fn test_idle_exploration_on_empty_arena() {
        let arena = ArenaBuilder::new(9, 9).combatant("bot", 4, 4).build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Idle);
        assert!(matches!(decision.action, Action::Move { steps: 1, .. }));
    }

    #[test]
    fn test_boxed_in_agent_waits() {
        let arena = ArenaBuilder::new(5, 5)
            .wall(1, 0)
            .wall(0, 1)
            .combatant("bot", 0, 0)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Idle);
        assert_eq!(decision.action, Action::Wait);
    }

    #[test]
    fn test_exploration_is_reproducible_per_seed() {
        let arena = ArenaBuilder::new(9, 9).combatant("bot", 4, 4).build();
        let id = CombatantId::from("bot");
        let a = decide(&arena, &id, &mut ExploreRng::new(7)).unwrap();
        let b = decide(&arena, &id, &mut ExploreRng::new(7)).unwrap();
        assert_eq!(a.action, b.action);
    }

    #[test]
    fn test_escape_outranks_attack() {
        // Bomb about to blow next to the bot; enemy in attack range. The
        // escape branch must fire, never a bomb placement or hunt.
        let arena = ArenaBuilder::new(13, 11)
            .bomb(5, 6, 1)
            .combatant("bot", 5, 5)
            .combatant("enemy", 5, 3)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Escaping);
        let Action::Move { direction, .. } = decision.action else {
            panic!("expected a move, got {:?}", decision.action);
        };
        assert_ne!(direction, Direction::Up, "must not move toward the bomb");
    }

    #[test]
    fn test_adjacent_enemy_with_retreat_triggers_bomb() {
        let arena = ArenaBuilder::new(13, 11)
            .combatant("bot", 4, 4)
            .combatant("enemy", 4, 5)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Attacking);
        assert_eq!(decision.action, Action::PlaceBomb);
    }

    #[test]
    fn test_adjacent_enemy_without_retreat_does_not_bomb() {
        // Corner pocket covered by a long-fuse bomb: not yet imminent
        // danger, but no reachable safe cell either, so bombing the
        // adjacent enemy would be suicidal.
        let arena = ArenaBuilder::new(5, 5)
            .wall(0, 2)
            .wall(1, 2)
            .wall(2, 2)
            .wall(3, 2)
            .wall(3, 1)
            .wall(3, 0)
            .bomb(0, 1, 9)
            .combatant("bot", 0, 0)
            .combatant("enemy", 1, 0)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Attacking);
        assert_ne!(decision.action, Action::PlaceBomb);
    }

    #[test]
    fn test_hunt_move_stops_before_enemy_cell() {
        // Open corridor straight up to the enemy: the move commits only
        // to the unoccupied cells ahead, never onto the enemy itself.
        let arena = ArenaBuilder::new(13, 11)
            .combatant("bot", 4, 4)
            .combatant("enemy", 4, 7)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Attacking);
        assert_eq!(
            decision.action,
            Action::Move {
                direction: Direction::Up,
                steps: 2
            }
        );
    }

    #[test]
    fn test_box_beside_bot_triggers_bomb() {
        let arena = ArenaBuilder::new(9, 9)
            .box_at(5, 4)
            .combatant("bot", 4, 4)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Collecting);
        assert_eq!(decision.action, Action::PlaceBomb);
    }

    #[test]
    fn test_distant_box_is_approached() {
        let arena = ArenaBuilder::new(9, 9)
            .box_at(8, 4)
            .combatant("bot", 1, 4)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Collecting);
        assert!(matches!(
            decision.action,
            Action::Move {
                direction: Direction::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_collect_outranks_hunt_beyond_attack_range() {
        let arena = ArenaBuilder::new(13, 11)
            .box_at(5, 4)
            .combatant("bot", 4, 4)
            .combatant("enemy", 12, 10)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Collecting);
    }

    #[test]
    fn test_distant_enemy_is_hunted_when_no_boxes() {
        let arena = ArenaBuilder::new(13, 11)
            .combatant("bot", 1, 1)
            .combatant("enemy", 11, 9)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Hunting);
        assert!(matches!(decision.action, Action::Move { .. }));
    }

    #[test]
    fn test_nearest_enemy_picked_by_manhattan_distance() {
        let arena = ArenaBuilder::new(13, 11)
            .combatant("bot", 6, 5)
            .combatant("far", 12, 10)
            .combatant("near", 6, 8)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        // "near" is 3 away: attack range.
        assert_eq!(decision.mode, Mode::Attacking);
    }

    #[test]
    fn test_dead_enemy_is_not_targeted() {
        let arena = ArenaBuilder::new(9, 9)
            .combatant("bot", 4, 4)
            .dead_combatant("corpse", 4, 5)
            .build();
        let decision = decide(&arena, &CombatantId::from("bot"), &mut rng()).unwrap();
        assert_eq!(decision.mode, Mode::Idle);
    }

    #[test]
    fn test_shuffle_covers_all_directions() {
        let mut rng = ExploreRng::new(1);
        let dirs = rng.shuffled_directions();
        let mut sorted = dirs.to_vec();
        sorted.sort_by_key(|d| *d as u8);
        assert_eq!(sorted, Direction::ALL.to_vec());
    }
}
