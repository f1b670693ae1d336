//! Proptest strategies for arenas and positions.

use bomber_core::arena::{Arena, ArenaStatus, Cell, Grid, Position};
use proptest::prelude::*;

/// Strategy for a small obstacle arena: random walls at roughly the given
/// density, no combatants, no bombs.
///
/// Dimensions range over `2..=max_width` x `2..=max_height` so that
/// degenerate single-cell grids do not dominate the search space.
pub fn arb_obstacle_arena(
    max_width: u32,
    max_height: u32,
    wall_density: f64,
) -> impl Strategy<Value = Arena> {
    (2..=max_width, 2..=max_height)
        .prop_flat_map(move |(width, height)| {
            let cell_count = (width * height) as usize;
            let cells = proptest::collection::vec(
                proptest::bool::weighted(wall_density)
                    .prop_map(|is_wall| if is_wall { Cell::Wall } else { Cell::Empty }),
                cell_count,
            );
            (Just(width), Just(height), cells)
        })
        .prop_map(|(width, height, cells)| Arena {
            id: 1,
            grid: Grid::from_cells(width, height, cells)
                .expect("generated cell count matches dimensions"),
            combatants: Vec::new(),
            status: ArenaStatus::Active,
            tick: 0,
        })
}

/// Strategy for a position inside the given dimensions.
pub fn arb_position(width: u32, height: u32) -> impl Strategy<Value = Position> {
    (0..width as i32, 0..height as i32).prop_map(|(x, y)| Position::new(x, y))
}
