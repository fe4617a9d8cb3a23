//! Board Generation
//!
//! Synthetic initial boards for runs without a board file.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Coord, Dimensions, Strategy};
use crate::error::{SimError, SimResult};

/// All cooperators except a single defector at the center.
///
/// On even dimensions the defector sits just below and right of the middle.
pub fn single_defector(dims: Dimensions) -> Board {
    let mut board = Board::filled(dims, Strategy::Cooperate);
    let center = Coord::new(dims.rows() / 2, dims.cols() / 2);
    if let Ok(index) = dims.index_of(center) {
        board.cells_mut()[index].strategy = Strategy::Defect;
    }
    board
}

/// Each cell defects independently with probability `defector_fraction`.
///
/// The same seed always yields the same board.
pub fn random_board(dims: Dimensions, defector_fraction: f64, seed: u64) -> SimResult<Board> {
    if !(0.0..=1.0).contains(&defector_fraction) {
        return Err(SimError::InvalidFraction(defector_fraction));
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::filled(dims, Strategy::Cooperate);
    for cell in board.cells_mut() {
        if rng.gen_bool(defector_fraction) {
            cell.strategy = Strategy::Defect;
        }
    }
    Ok(board)
}
