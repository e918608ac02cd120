//! Caller-facing errors.
//!
//! Degenerate layouts (empty masks, zero rooms, failed pathfinding) are
//! handled by silent fallback inside the pipeline; only malformed input from
//! the caller is surfaced as an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// Grid dimensions must both be positive.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// An outline room could not be coerced to a valid rectangle.
    #[error("outline room {id} degenerates to a {width}x{height} rectangle")]
    InvalidOutlineRoom { id: u32, width: i32, height: i32 },
}
