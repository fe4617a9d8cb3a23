//! Board Setup
//!
//! Loading board files and generating initial boards.

pub mod generate;
pub mod loader;

pub use generate::*;
pub use loader::*;

use tracing::info;

use crate::board::Dimensions;
use crate::config::{BoardConfig, BoardLayout};
use crate::Board;

/// Builds the initial board described by a board configuration.
///
/// A board file wins over the generated layouts.
pub fn initial_board(config: &BoardConfig) -> Result<Board, LoadError> {
    if let Some(path) = &config.path {
        let board = load_board(path)?;
        info!(path = %path.display(), dims = %board.dims(), "loaded initial board");
        return Ok(board);
    }

    let dims = Dimensions::new(config.random_rows, config.random_cols)?;
    let board = match config.layout {
        BoardLayout::SingleDefector => single_defector(dims),
        BoardLayout::Random => random_board(dims, config.defector_fraction, config.seed)?,
    };
    info!(
        layout = ?config.layout,
        dims = %dims,
        seed = config.seed,
        "generated initial board"
    );
    Ok(board)
}
