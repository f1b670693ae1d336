//! # Bomber Core
//!
//! Deterministic agent intelligence core for a turn-based, grid-combat
//! bombing arena.
//!
//! Given one immutable arena snapshot per poll, the core selects the
//! single best next action: flee an imminent blast, bomb an adjacent
//! enemy or box, close on a target, or explore. Everything in this crate
//! is synchronous and reproducible:
//!
//! - No IO and no transport; snapshots come in, one action goes out
//! - No system randomness; exploration uses an explicit seeded PRNG
//! - Transient search state per call; nothing shared across invocations
//!
//! ## Crate Structure
//!
//! - [`arena`] - immutable per-tick arena model
//! - [`search`] - A* pathfinding and BFS reachability queries
//! - [`threat`] - bomb fuse and blast-ray classification
//! - [`decision`] - the priority decision engine
//! - [`session`] - per-agent rate limiting and reported mode
//! - [`wire`] - wire-format snapshot ingestion
//! - [`action`] - action commands and path conversion

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod action;
pub mod arena;
pub mod decision;
pub mod error;
pub mod search;
pub mod session;
pub mod threat;
pub mod wire;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::action::{path_to_action, Action, MAX_RUN_LENGTH};
    pub use crate::arena::{
        Arena, ArenaStatus, Cell, Combatant, CombatantId, Direction, Grid, Position,
    };
    pub use crate::decision::{decide, Decision, ExploreRng, Mode, ATTACK_RANGE};
    pub use crate::error::{BotError, Result};
    pub use crate::session::{Session, DECISION_COOLDOWN};
    pub use crate::wire::WireGame;
}
