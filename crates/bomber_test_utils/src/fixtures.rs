//! Arena fixture builder for tests.

use bomber_core::arena::{
    Arena, ArenaStatus, Cell, Combatant, CombatantId, Direction, Grid, Position,
};

/// Fluent builder for test arenas.
///
/// Starts from an all-empty grid of the given size, active status, full
/// health for every combatant. Panics on out-of-bounds placements so a
/// broken fixture fails at construction, not mid-assertion.
#[derive(Debug, Clone)]
pub struct ArenaBuilder {
    grid: Grid,
    combatants: Vec<Combatant>,
    status: ArenaStatus,
    id: u64,
    tick: u64,
}

impl ArenaBuilder {
    /// Start a builder for a `width` x `height` arena of empty cells.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height).expect("fixture grid dimensions must be positive"),
            combatants: Vec::new(),
            status: ArenaStatus::Active,
            id: 1,
            tick: 0,
        }
    }

    fn set(mut self, x: i32, y: i32, cell: Cell) -> Self {
        assert!(
            self.grid.set_cell(Position::new(x, y), cell),
            "fixture cell ({x}, {y}) is outside the grid"
        );
        self
    }

    /// Place a wall.
    #[must_use]
    pub fn wall(self, x: i32, y: i32) -> Self {
        self.set(x, y, Cell::Wall)
    }

    /// Place a destructible box.
    #[must_use]
    pub fn box_at(self, x: i32, y: i32) -> Self {
        self.set(x, y, Cell::Box)
    }

    /// Place a bomb with the given fuse.
    #[must_use]
    pub fn bomb(self, x: i32, y: i32, timer: u8) -> Self {
        self.set(x, y, Cell::Bomb { timer })
    }

    /// Wall off the entire perimeter.
    #[must_use]
    pub fn bordered(mut self) -> Self {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        for x in 0..w {
            assert!(self.grid.set_cell(Position::new(x, 0), Cell::Wall));
            assert!(self.grid.set_cell(Position::new(x, h - 1), Cell::Wall));
        }
        for y in 0..h {
            assert!(self.grid.set_cell(Position::new(0, y), Cell::Wall));
            assert!(self.grid.set_cell(Position::new(w - 1, y), Cell::Wall));
        }
        self
    }

    /// Add a living combatant at full health.
    #[must_use]
    pub fn combatant(mut self, id: &str, x: i32, y: i32) -> Self {
        let position = Position::new(x, y);
        assert!(
            self.grid.in_bounds(position),
            "fixture combatant ({x}, {y}) is outside the grid"
        );
        self.combatants.push(Combatant {
            position,
            health: 100,
            id: CombatantId::from(id),
            facing: Direction::Down,
        });
        self
    }

    /// Add an eliminated combatant.
    #[must_use]
    pub fn dead_combatant(mut self, id: &str, x: i32, y: i32) -> Self {
        self = self.combatant(id, x, y);
        self.combatants
            .last_mut()
            .expect("combatant just pushed")
            .health = 0;
        self
    }

    /// Override the match status.
    #[must_use]
    pub fn status(mut self, status: ArenaStatus) -> Self {
        self.status = status;
        self
    }

    /// Override the snapshot tick.
    #[must_use]
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Finish and produce the arena snapshot.
    #[must_use]
    pub fn build(self) -> Arena {
        Arena {
            id: self.id,
            grid: self.grid,
            combatants: self.combatants,
            status: self.status,
            tick: self.tick,
        }
    }
}
