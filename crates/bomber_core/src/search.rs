//! Grid search engine: A* pathfinding and BFS reachability queries.
//!
//! All searches run over 4-connected cardinal movement with unit edge
//! cost. Search state is allocated per call and discarded on return;
//! nothing is shared between invocations.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::arena::{Arena, Direction, Position};
use crate::threat;

/// A node in the A* open set priority queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct SearchNode {
    /// Grid position.
    position: Position,
    /// f = g + Manhattan heuristic.
    f: u32,
    /// Insertion sequence number. Among equal f scores the earliest-pushed
    /// node wins, keeping expansion order reproducible.
    seq: u64,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse for min-heap behavior.
        match other.f.cmp(&self.f) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ord => ord,
        }
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether a cell may be entered during a search.
///
/// Excludes non-walkable cells, cells occupied by a living combatant, and,
/// when `avoid_threat` is set, cells inside any bomb's blast path.
fn is_open(arena: &Arena, pos: Position, avoid_threat: bool) -> bool {
    arena.is_walkable(pos)
        && !arena.is_occupied(pos)
        && !(avoid_threat && threat::in_blast_path(arena, pos))
}

/// Find a shortest path from `start` to `goal` using A* with a Manhattan
/// heuristic.
///
/// The returned path includes `start` as element 0 and `goal` as the last
/// element, so a length-1 result means `start == goal` and an empty result
/// means no path exists. No path is not an error; callers fall back to a
/// lower-priority behavior.
///
/// The goal cell is exempt from the occupancy test so that a path "toward"
/// a combatant completes; the cells leading up to it are still checked.
/// Callers targeting a combatant must drop the final element before
/// converting the path into a move.
#[must_use]
pub fn find_path(arena: &Arena, start: Position, goal: Position, avoid_threat: bool) -> Vec<Position> {
    if !arena.grid.in_bounds(start) || !arena.grid.in_bounds(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let mut open_set: BinaryHeap<SearchNode> = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, u32> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut seq: u64 = 0;

    // Defensive cap: a well-formed search expands each cell at most once.
    let max_expansions = arena.grid.cell_count();
    let mut expansions = 0usize;

    g_score.insert(start, 0);
    open_set.push(SearchNode {
        position: start,
        f: start.manhattan_distance(goal),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if closed.contains(&current.position) {
            continue; // Stale heap entry.
        }
        if current.position == goal {
            return reconstruct_path(&came_from, goal);
        }
        closed.insert(current.position);

        expansions += 1;
        if expansions > max_expansions {
            tracing::debug!(
                ?start,
                ?goal,
                expansions,
                "A* expansion cap hit, treating as no path"
            );
            return Vec::new();
        }

        let current_g = g_score.get(&current.position).copied().unwrap_or(u32::MAX);

        for direction in Direction::ALL {
            let next = current.position.step(direction);
            if closed.contains(&next) {
                continue;
            }
            if next != goal && !is_open(arena, next, avoid_threat) {
                continue;
            }
            if next == goal && !arena.is_walkable(next) {
                continue;
            }

            let tentative_g = current_g + 1;
            if tentative_g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current.position);
                g_score.insert(next, tentative_g);
                seq += 1;
                open_set.push(SearchNode {
                    position: next,
                    f: tentative_g + next.manhattan_distance(goal),
                    seq,
                });
            }
        }
    }

    Vec::new()
}

/// Reconstruct the start-to-goal path from the predecessor map.
fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Breadth-first search outward from `start` over walkable, unoccupied,
/// threat-avoiding cells, returning the first cell with at least one
/// cardinal neighbor whose position satisfies `predicate`.
///
/// `start` itself is examined first even when it would not qualify as a
/// BFS successor (the agent is standing there). Minimum hop count is
/// guaranteed by BFS order.
#[must_use]
pub fn find_nearest_adjacent<F>(arena: &Arena, start: Position, predicate: F) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    let mut queue: VecDeque<Position> = VecDeque::new();
    let mut visited: HashSet<Position> = HashSet::new();
    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if Direction::ALL
            .iter()
            .any(|&dir| predicate(current.step(dir)))
        {
            return Some(current);
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if visited.contains(&next) || !is_open(arena, next, true) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    None
}

/// Breadth-first search for the nearest cell outside every blast path.
///
/// Movement here ignores threat on purpose: a fleeing agent may need to
/// cross currently-threatened cells to reach safety.
#[must_use]
pub fn find_nearest_safe(arena: &Arena, start: Position) -> Option<Position> {
    let mut queue: VecDeque<Position> = VecDeque::new();
    let mut visited: HashSet<Position> = HashSet::new();
    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if !threat::in_blast_path(arena, current) {
            return Some(current);
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if visited.contains(&next) || !is_open(arena, next, false) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    None
}
