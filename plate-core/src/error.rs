//! Error types for plate-core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlateError {
    /// Two grids of one state do not share a shape.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// No interior cells exist.
    #[error("Grid {rows}x{cols} is too small, need at least 3x3")]
    GridTooSmall { rows: usize, cols: usize },

    /// Nested rows of unequal length.
    #[error("Ragged grid: row {row} has {len} values, expected {expected}")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Flat buffer length does not match `rows * cols`.
    #[error("Buffer holds {actual} values, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Initial data already holds NaN or an infinity.
    #[error("Non-finite initial value at cell ({row}, {col})")]
    NonFiniteInput { row: usize, col: usize },

    /// A step wrote NaN or an infinity.
    #[error("Non-finite value at step {step}, cell ({row}, {col})")]
    NonFiniteResult { step: usize, row: usize, col: usize },
}

impl PlateError {
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlateError>;
