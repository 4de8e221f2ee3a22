//! Error type for lattice construction and error injection.
//!
//! Check results ("X1 error", stabilizer violations, ...) are not errors; they are
//! returned as [`crate::syndrome::CheckOutcome`] values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// Grid dimensions do not describe an L×L stabilizer grid with a 2L×L qubit grid.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("qubit ({row},{col}) is outside the {rows}x{cols} qubit grid")]
    QubitOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("stabilizer ({row},{col}) is outside the {n}x{n} stabilizer grid")]
    StabilizerOutOfRange { row: usize, col: usize, n: usize },

    #[error("probability {0} is not in [0, 1]")]
    InvalidProbability(f64),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
