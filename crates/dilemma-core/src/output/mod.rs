//! Output Generation
//!
//! Run statistics and final-board files.

pub mod stats;

pub use stats::*;

use std::fs;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::setup::board_to_text;

/// Final board file name inside the output directory
pub const FINAL_BOARD_FILE_NAME: &str = "final_board.txt";

/// Write the final generation in board-file format into `dir`.
pub fn write_final_board(board: &Board, dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(FINAL_BOARD_FILE_NAME);
    fs::write(&path, board_to_text(board))?;
    Ok(path)
}
