//! Actions and the path-to-action conversion.

use serde::{Deserialize, Serialize};

use crate::arena::{Direction, Position};

/// Longest run of same-direction steps committed to in one action.
///
/// A multi-step move is an optimization to reduce interaction round trips,
/// but every committed cell is one the threat model never re-evaluated, so
/// the run is kept short to bound risk from stale snapshots.
pub const MAX_RUN_LENGTH: u8 = 4;

/// One discrete command for the action-execution collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing this tick.
    Wait,
    /// Move `steps` consecutive cells in `direction`.
    Move {
        /// Direction of travel.
        direction: Direction,
        /// Number of cells, `1..=MAX_RUN_LENGTH`.
        steps: u8,
    },
    /// Drop a bomb on the current cell.
    PlaceBomb,
}

/// Convert a computed path into one move command.
///
/// `path[0]` is the current position. The direction comes from the first
/// segment; the step count greedily extends while subsequent segments
/// continue in the same direction, capped at [`MAX_RUN_LENGTH`]. A path of
/// length <= 1, or one whose first segment is not a unit cardinal step,
/// yields [`Action::Wait`].
#[must_use]
pub fn path_to_action(path: &[Position]) -> Action {
    if path.len() < 2 {
        return Action::Wait;
    }
    let Some(direction) = Direction::between(path[0], path[1]) else {
        return Action::Wait;
    };

    let mut steps: u8 = 1;
    for segment in path.windows(2).skip(1) {
        if steps >= MAX_RUN_LENGTH {
            break;
        }
        if Direction::between(segment[0], segment[1]) == Some(direction) {
            steps += 1;
        } else {
            break;
        }
    }

    Action::Move { direction, steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_empty_and_single_paths_wait() {
        assert_eq!(path_to_action(&[]), Action::Wait);
        assert_eq!(path_to_action(&[pos(3, 3)]), Action::Wait);
    }

    #[test]
    fn test_single_step() {
        let path = [pos(3, 3), pos(4, 3)];
        assert_eq!(
            path_to_action(&path),
            Action::Move {
                direction: Direction::Right,
                steps: 1
            }
        );
    }

    #[test]
    fn test_run_extends_while_direction_holds() {
        let path = [pos(0, 0), pos(0, 1), pos(0, 2), pos(1, 2), pos(2, 2)];
        assert_eq!(
            path_to_action(&path),
            Action::Move {
                direction: Direction::Up,
                steps: 2
            }
        );
    }

    #[test]
    fn test_run_capped_at_max() {
        let path: Vec<Position> = (0..8).map(|x| pos(x, 0)).collect();
        assert_eq!(
            path_to_action(&path),
            Action::Move {
                direction: Direction::Right,
                steps: MAX_RUN_LENGTH
            }
        );
    }

    #[test]
    fn test_degenerate_first_segment_waits() {
        // Repeated position.
        assert_eq!(path_to_action(&[pos(2, 2), pos(2, 2)]), Action::Wait);
        // Non-adjacent jump.
        assert_eq!(path_to_action(&[pos(2, 2), pos(5, 2)]), Action::Wait);
        // Diagonal.
        assert_eq!(path_to_action(&[pos(2, 2), pos(3, 3)]), Action::Wait);
    }

    #[test]
    fn test_steps_never_exceed_same_direction_segments() {
        // Zig-zag path: only the first segment matches.
        let path = [pos(0, 0), pos(1, 0), pos(1, 1), pos(2, 1)];
        assert_eq!(
            path_to_action(&path),
            Action::Move {
                direction: Direction::Right,
                steps: 1
            }
        );
    }
}
