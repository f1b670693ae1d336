//! Blast-zone threat classification.
//!
//! A bomb threatens its own cell and the cells along the four cardinal
//! rays, out to a blast radius. Walls and boxes stop a ray; the blocking
//! cell itself and everything beyond it are unaffected.
//!
//! Two classifications exist on purpose:
//!
//! - [`in_blast_path`] is the cautious check used when choosing routes
//!   (radius 1, any fuse).
//! - [`is_imminent_danger`] is the self-risk check used to trigger an
//!   escape (radius 2, but only bombs about to detonate). Tolerating
//!   long-fuse bombs here permits bolder play near freshly placed bombs.

use crate::arena::{Arena, Cell, Direction, Position};

/// Blast radius assumed when avoiding cells during pathfinding.
pub const ROUTE_BLAST_RADIUS: u32 = 1;

/// Blast radius assumed when judging the agent's own position.
pub const SELF_BLAST_RADIUS: u32 = 2;

/// Fuse threshold for the self-risk check: only bombs with
/// `timer <= IMMINENT_FUSE` are treated as imminent.
pub const IMMINENT_FUSE: u8 = 2;

/// Route-avoidance check: is `pos` on a bomb or inside the radius-1 blast
/// path of any bomb, regardless of fuse?
#[must_use]
pub fn in_blast_path(arena: &Arena, pos: Position) -> bool {
    threatened(arena, pos, ROUTE_BLAST_RADIUS, None)
}

/// Self-risk check: is `pos` on a bomb, or inside the radius-2 blast path
/// of a bomb whose fuse is at most [`IMMINENT_FUSE`]?
#[must_use]
pub fn is_imminent_danger(arena: &Arena, pos: Position) -> bool {
    threatened(arena, pos, SELF_BLAST_RADIUS, Some(IMMINENT_FUSE))
}

/// Shared ray walk. `max_fuse` of `None` counts every bomb; otherwise only
/// bombs with `timer <= max_fuse` count. A distant-fuse bomb on a ray does
/// not stop the scan: the ray continues past it.
fn threatened(arena: &Arena, pos: Position, radius: u32, max_fuse: Option<u8>) -> bool {
    // Standing on a bomb is always a threat, whatever the fuse.
    match arena.grid.cell(pos) {
        Some(Cell::Bomb { .. }) => return true,
        Some(_) => {}
        None => return false,
    }

    for direction in Direction::ALL {
        let mut probe = pos;
        for _ in 0..radius {
            probe = probe.step(direction);
            match arena.grid.cell(probe) {
                None | Some(Cell::Wall) => break,
                Some(Cell::Bomb { timer }) => {
                    if max_fuse.map_or(true, |fuse| timer <= fuse) {
                        return true;
                    }
                    // Fuse too long to matter yet; keep scanning outward.
                }
                Some(Cell::Box) => break,
                Some(Cell::Empty) => {}
            }
        }
    }

    false
}
