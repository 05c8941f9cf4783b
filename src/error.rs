//! Error types for the encode/transform/decode pipeline.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlurError>;

/// Errors emitted by the pipeline.
///
/// All variants are deterministic functions of malformed input; nothing here
/// is transient and there is no retry policy in the core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlurError {
    /// The channel has no nonzero heights, so the state would have zero norm.
    #[error("cannot encode a channel with no nonzero heights")]
    DegenerateState,

    /// An axis of length zero cannot be addressed.
    #[error("axis length must be at least 1")]
    EmptyAxis,

    /// A coordinate fell outside the grid rectangle.
    #[error("coordinate ({x}, {y}) outside {lx}x{ly} grid")]
    CoordOutOfBounds {
        x: usize,
        y: usize,
        lx: usize,
        ly: usize,
    },

    /// A rotation addressed a bit the state does not have.
    #[error("bit {bit} out of range for a {n_bits}-bit state")]
    BitOutOfRange { bit: usize, n_bits: usize },

    /// Grid size metadata disagrees with the amplitude vector's bit width.
    #[error("grid {lx}x{ly} does not fit a {n_bits}-bit amplitude vector")]
    SizeMismatch {
        lx: usize,
        ly: usize,
        n_bits: usize,
    },
}
