//! Scenario loading: wire-format snapshots from disk.
//!
//! Lets a recorded snapshot (the same JSON shape the polling layer
//! consumes) be replayed as the starting state of a local match.

use std::path::Path;

use bomber_core::arena::Arena;
use bomber_core::wire::WireGame;
use thiserror::Error;

/// Errors from loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Could not read the file.
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid snapshot JSON.
    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The snapshot is structurally invalid.
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] bomber_core::error::BotError),
}

/// Load a wire-format snapshot file and convert it to an arena.
///
/// # Errors
///
/// Returns [`ScenarioError`] if the file cannot be read, is not valid
/// JSON, or describes an inconsistent arena.
pub fn load_arena(path: &Path) -> Result<Arena, ScenarioError> {
    let raw = std::fs::read_to_string(path)?;
    let wire: WireGame = serde_json::from_str(&raw)?;
    Ok(wire.into_arena()?)
}
