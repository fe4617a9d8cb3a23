//! Simulation Errors
//!
//! Configuration errors and invariant violations raised by the core engine.

use thiserror::Error;

use crate::board::Coord;

/// Errors raised by board construction and the round engine.
///
/// None of these are retryable. Configuration errors are reported before any
/// simulation work starts; invariant violations name the offending coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A board must have at least one row and one column
    #[error("board dimensions must be positive, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },

    /// The cell count does not fit in memory addressing
    #[error("a {rows}x{cols} board has too many cells")]
    TooManyCells { rows: usize, cols: usize },

    /// A 1x1 board has nobody to play against
    #[error("a 1x1 board has no neighbors to play against")]
    SingleCell,

    /// A coordinate outside the board was handed to the engine
    #[error("coordinate {coord} is out of range for a {rows}x{cols} board")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    /// The payoff parameter must be a finite real
    #[error("payoff parameter b must be finite, got {0}")]
    InvalidPayoff(f64),

    /// A probability outside `[0, 1]`
    #[error("fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),

    /// A cell was never assigned a strategy
    #[error("cell {0} has no strategy assigned")]
    UnsetCell(Coord),

    /// Rows of differing lengths were supplied
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two boards (or a board and a table) disagree on size
    #[error("expected a {expected_rows}x{expected_cols} board, got {rows}x{cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

/// Convenience alias for core results.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_coordinate() {
        let err = SimError::OutOfBounds {
            coord: Coord::new(4, 7),
            rows: 3,
            cols: 3,
        };
        assert_eq!(
            err.to_string(),
            "coordinate (4, 7) is out of range for a 3x3 board"
        );

        let err = SimError::UnsetCell(Coord::new(1, 2));
        assert_eq!(err.to_string(), "cell (1, 2) has no strategy assigned");
    }

    #[test]
    fn test_invalid_payoff_message() {
        let err = SimError::InvalidPayoff(f64::INFINITY);
        assert_eq!(err.to_string(), "payoff parameter b must be finite, got inf");
    }
}
