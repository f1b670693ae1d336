//! Error types for the agent core.

use thiserror::Error;

/// Result type alias using [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;

/// Top-level error type for the agent core.
///
/// Only collaborator programming errors surface here. Absent search
/// results (no path, no safe cell, no target) are `Option`/empty returns,
/// and a malformed-but-parseable snapshot degrades to `Action::Wait`
/// inside the decision engine.
#[derive(Debug, Error)]
pub enum BotError {
    /// Grid constructed with a zero dimension.
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },

    /// Cell buffer does not match the declared dimensions.
    #[error("Grid cell count mismatch: {width}x{height} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        /// Declared width in cells.
        width: u32,
        /// Declared height in cells.
        height: u32,
        /// Expected cell count (`width * height`).
        expected: usize,
        /// Cell count actually supplied.
        actual: usize,
    },

    /// Wire snapshot is structurally unusable.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
