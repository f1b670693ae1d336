//! Wire-format snapshot ingestion.
//!
//! The snapshot-polling collaborator deserializes ledger account data into
//! these loosely-typed mirror structures and hands them to
//! [`WireGame::into_arena`] for conversion into the strict arena model.
//!
//! Defaulting rules for unrecognized data: unknown cell variants become
//! [`Cell::Empty`], unknown or absent facing becomes [`Direction::Down`],
//! and unknown match status becomes [`ArenaStatus::Waiting`]. Structural
//! violations (dimensions, cell counts, out-of-range combatants) are
//! programming errors in the collaborator and fail loudly instead.

use serde::Deserialize;

use crate::arena::{
    Arena, ArenaStatus, Cell, Combatant, CombatantId, Direction, Grid, Position,
};
use crate::error::{BotError, Result};

/// One grid cell as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "type", content = "timer", rename_all = "lowercase")]
pub enum WireCell {
    /// Open floor.
    #[default]
    Empty,
    /// Indestructible wall.
    Wall,
    /// Destructible box.
    #[serde(rename = "box")]
    Crate,
    /// Armed bomb with its remaining fuse ticks.
    Bomb(u8),
    /// Anything this client version does not recognize.
    #[serde(other)]
    Unknown,
}

impl From<WireCell> for Cell {
    fn from(cell: WireCell) -> Self {
        match cell {
            WireCell::Empty | WireCell::Unknown => Self::Empty,
            WireCell::Wall => Self::Wall,
            WireCell::Crate => Self::Box,
            WireCell::Bomb(timer) => Self::Bomb { timer },
        }
    }
}

/// One combatant as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCombatant {
    /// Column coordinate.
    pub x: i32,
    /// Row coordinate.
    pub y: i32,
    /// Remaining health.
    pub health: u8,
    /// Identity token (rendered address).
    pub address: String,
    /// Facing, as a lowercase token; absent or unrecognized means down.
    #[serde(default)]
    pub facing: Option<String>,
}

/// Match status as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum WireStatus {
    /// Waiting for participants.
    #[default]
    Waiting,
    /// Match in progress.
    Active,
    /// Match over.
    Won {
        /// Winner address, if any.
        #[serde(default)]
        winner: Option<String>,
    },
    /// Anything this client version does not recognize.
    #[serde(other)]
    Unknown,
}

/// A full game snapshot as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGame {
    /// Match identifier.
    pub id: u64,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Row-major cell data.
    #[serde(default)]
    pub cells: Vec<WireCell>,
    /// All participants.
    #[serde(default)]
    pub players: Vec<WireCombatant>,
    /// Match status; absent means waiting.
    #[serde(default)]
    pub game_state: Option<WireStatus>,
    /// Tick counter.
    #[serde(default)]
    pub tick_count: u64,
}

impl WireGame {
    /// Convert into a strict [`Arena`] snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the grid constructor errors for a zero dimension or a
    /// cell-count mismatch, and returns [`BotError::MalformedSnapshot`]
    /// for a combatant positioned outside the grid.
    pub fn into_arena(self) -> Result<Arena> {
        let cells: Vec<Cell> = self.cells.into_iter().map(Cell::from).collect();
        let grid = Grid::from_cells(self.width, self.height, cells)?;

        let mut combatants = Vec::with_capacity(self.players.len());
        for player in self.players {
            let position = Position::new(player.x, player.y);
            if !grid.in_bounds(position) {
                return Err(BotError::MalformedSnapshot(format!(
                    "combatant {} at ({}, {}) is outside the {}x{} grid",
                    player.address,
                    player.x,
                    player.y,
                    grid.width(),
                    grid.height()
                )));
            }
            combatants.push(Combatant {
                position,
                health: player.health,
                id: CombatantId::new(player.address),
                facing: parse_facing(player.facing.as_deref()),
            });
        }

        let status = match self.game_state.unwrap_or_default() {
            WireStatus::Waiting | WireStatus::Unknown => ArenaStatus::Waiting,
            WireStatus::Active => ArenaStatus::Active,
            WireStatus::Won { winner } => ArenaStatus::Ended {
                winner: winner.map(CombatantId::new),
            },
        };

        Ok(Arena {
            id: self.id,
            grid,
            combatants,
            status,
            tick: self.tick_count,
        })
    }
}

/// Map a wire facing token to a [`Direction`], defaulting to down.
fn parse_facing(token: Option<&str>) -> Direction {
    match token {
        Some("up") => Direction::Up,
        Some("left") => Direction::Left,
        Some("right") => Direction::Right,
        _ => Direction::Down,
    }
}
