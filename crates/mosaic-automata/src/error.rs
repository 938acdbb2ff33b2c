//! Error types for the automaton engine.

use thiserror::Error;

/// Result type for automaton construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building an automaton.
///
/// Stepping a constructed automaton never fails; only allocation,
/// canvas-size checks and kind lookup can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A cell buffer could not be allocated
    #[error("failed to allocate a buffer of {cells} cells")]
    Allocation { cells: usize },

    /// Width or height is zero
    #[error("canvas has no cells")]
    EmptyCanvas,

    /// The canvas cannot hold the variant's bands
    #[error("canvas {width}x{height} is too small (needs at least {min_height} rows)")]
    CanvasTooSmall {
        width: usize,
        height: usize,
        min_height: usize,
    },

    /// An automaton kind name was not recognized
    #[error("unknown automaton kind: {0}")]
    UnknownKind(String),
}
