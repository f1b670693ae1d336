//! Arena model: immutable per-tick representation of the grid and combatants.
//!
//! One [`Arena`] is constructed per snapshot poll and consumed read-only by
//! a single decision. All queries here are O(1) (or O(combatants) for
//! occupancy) and side-effect free; every other component builds on them.

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// Integer grid coordinate, 0-based.
///
/// Signed so that neighbor arithmetic and out-of-bounds probes are natural;
/// the grid itself rejects anything outside `0..width x 0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing rightward.
    pub x: i32,
    /// Row, growing upward (matches the on-chain program's axis).
    pub y: i32,
}

impl Position {
    /// Create a position from coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent position one cell in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Cardinal movement/facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward larger `y`.
    Up,
    /// Toward smaller `y`. Default facing for combatants.
    #[default]
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward larger `x`.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order used for deterministic
    /// neighbor enumeration.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit coordinate delta for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The direction of a single-cell step from `from` to `to`, or `None`
    /// if the two positions are not cardinally adjacent.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        match (dx, dy) {
            (0, 1) => Some(Self::Up),
            (0, -1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// One cell of the arena grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Open floor.
    #[default]
    Empty,
    /// Indestructible wall. Impassable, blocks blast propagation.
    Wall,
    /// Destructible box. Impassable, blocks blast propagation, yields a
    /// power-up when destroyed.
    Box,
    /// An armed bomb. Never walkable, regardless of timer.
    Bomb {
        /// Remaining fuse ticks; 0 means detonating.
        timer: u8,
    },
}

impl Cell {
    /// Returns true if an agent may stand on this cell.
    ///
    /// Only [`Cell::Empty`] is walkable; a bomb cell is not, even one
    /// about to clear.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true if this cell stops a blast ray.
    #[must_use]
    pub const fn blocks_blast(self) -> bool {
        matches!(self, Self::Wall | Self::Box)
    }
}

/// Dense row-major grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Cell data stored in row-major order (`y * width + x`).
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ZeroDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BotError::ZeroDimension { width, height });
        }
        let cell_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; cell_count],
        })
    }

    /// Create a grid from an existing cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ZeroDimension`] for a zero dimension and
    /// [`BotError::CellCountMismatch`] if the buffer length does not equal
    /// `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BotError::ZeroDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(BotError::CellCountMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check if a position is within grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Convert an in-bounds position to its row-major index.
    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos));
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }

    /// Cell at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Overwrite the cell at `pos`. Returns `false` if out of bounds.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> bool {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.cells[index] = cell;
            true
        } else {
            false
        }
    }

    /// True if the cell at `pos` exists and is walkable.
    #[must_use]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }
}

/// Opaque combatant identity token.
///
/// Equality is exact string equality; callers are expected to hand in a
/// representation-stable rendering of the underlying address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(String);

impl CombatantId {
    /// Wrap an identity token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombatantId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// One participant in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Current grid position.
    pub position: Position,
    /// Remaining health; 0 means eliminated.
    pub health: u8,
    /// Identity token.
    pub id: CombatantId,
    /// Facing direction.
    pub facing: Direction,
}

impl Combatant {
    /// True if this combatant is still in play.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Lifecycle state of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaStatus {
    /// Waiting for participants.
    Waiting,
    /// Match in progress.
    Active,
    /// Match over.
    Ended {
        /// Winner, if there was one.
        winner: Option<CombatantId>,
    },
}

/// Immutable snapshot of one arena at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    /// Match identifier.
    pub id: u64,
    /// The obstacle/bomb grid.
    pub grid: Grid,
    /// All combatants, living and eliminated.
    pub combatants: Vec<Combatant>,
    /// Match lifecycle state.
    pub status: ArenaStatus,
    /// Snapshot tick count.
    pub tick: u64,
}

impl Arena {
    /// Look up a combatant by identity.
    #[must_use]
    pub fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| &c.id == id)
    }

    /// Iterator over combatants still in play.
    pub fn living_combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    /// True if any living combatant stands at `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.living_combatants().any(|c| c.position == pos)
    }

    /// True if the cell at `pos` exists and is walkable.
    #[must_use]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.grid.is_walkable(pos)
    }
}
