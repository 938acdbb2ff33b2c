//! Error types for panel configuration.

use thiserror::Error;

/// Result type for panel configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating a panel table.
///
/// Mapping itself never fails; these only surface when a mapper is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The panel table has no entries.
    #[error("panel table is empty")]
    EmptyTable,

    /// Two entries claim the same logical grid position.
    #[error("logical position {0} appears more than once")]
    DuplicateLogical(u8),

    /// Two entries claim the same place in the chain.
    #[error("physical position {0} appears more than once")]
    DuplicatePhysical(u8),

    /// A rotation outside {0, 90, 180, 270} degrees.
    #[error("invalid rotation: {0}")]
    InvalidRotation(u16),

    /// Offset-table layout without an entry for a configured chain position.
    #[error("no offset configured for physical position {0}")]
    MissingOffset(u8),

    /// Dimensions are zero or do not fit the 16-bit pixel space.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
