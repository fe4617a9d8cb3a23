//! Board Files
//!
//! Reads and writes the plain-text board format:
//!
//! ```text
//! 3 4
//! CCCD
//! CDCC
//! CCCC
//! ```
//!
//! The first line holds the row and column counts, followed by one line per
//! row of `C`/`D` symbols. Blank lines are ignored.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Coord, Dimensions, Strategy};
use crate::error::SimError;

/// Errors raised while reading a board description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read board file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("board description is empty")]
    MissingHeader,

    #[error("line {line}: expected '<rows> <cols>', got '{text}'")]
    MalformedHeader { line: usize, text: String },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("line {line}: row {row} has {found} cells, expected {expected}")]
    RowLength {
        line: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid strategy '{symbol}' at {coord}")]
    InvalidSymbol {
        line: usize,
        coord: Coord,
        symbol: char,
    },

    #[error(transparent)]
    Board(#[from] SimError),
}

/// Parses a board description.
pub fn parse_board(text: &str) -> Result<Board, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let malformed = || LoadError::MalformedHeader {
        line: header_line,
        text: header.to_string(),
    };
    let dims: Vec<usize> = header
        .split_whitespace()
        .map(|part| part.parse::<usize>().map_err(|_| malformed()))
        .collect::<Result<_, _>>()?;
    let &[rows, cols] = dims.as_slice() else {
        return Err(malformed());
    };

    Dimensions::new(rows, cols)?;

    // Rows are checked against the header before any board storage exists
    let mut parsed: Vec<Vec<Strategy>> = Vec::new();
    for (line, text) in lines {
        let row = parsed.len();
        if row == rows {
            return Err(LoadError::RowCount {
                expected: rows,
                found: row + 1,
            });
        }

        let found = text.chars().count();
        if found != cols {
            return Err(LoadError::RowLength {
                line,
                row,
                expected: cols,
                found,
            });
        }

        let strategies = text
            .chars()
            .enumerate()
            .map(|(col, symbol)| {
                Strategy::from_symbol(symbol).ok_or(LoadError::InvalidSymbol {
                    line,
                    coord: Coord::new(row, col),
                    symbol,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        parsed.push(strategies);
    }

    if parsed.len() < rows {
        return Err(LoadError::RowCount {
            expected: rows,
            found: parsed.len(),
        });
    }

    Ok(Board::from_rows(parsed)?)
}

/// Reads a board file from disk.
pub fn load_board(path: &Path) -> Result<Board, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let board = parse_board(&text)?;
    debug!(path = %path.display(), dims = %board.dims(), "loaded board");
    Ok(board)
}

/// Formats a board in the file format accepted by [`parse_board`].
pub fn board_to_text(board: &Board) -> String {
    let mut out = String::with_capacity((board.cols() + 1) * (board.rows() + 1));
    let _ = writeln!(out, "{} {}", board.rows(), board.cols());
    for r in 0..board.rows() {
        out.extend(board.row(r).iter().map(|cell| cell.strategy.symbol()));
        out.push('\n');
    }
    out
}

/// Writes a board file to disk.
pub fn save_board(board: &Board, path: &Path) -> std::io::Result<()> {
    fs::write(path, board_to_text(board))
}

/// Formats the score grid, one row per line.
pub fn format_scores(board: &Board) -> String {
    let mut out = String::new();
    for r in 0..board.rows() {
        let line: Vec<String> = board
            .row(r)
            .iter()
            .map(|cell| format!("{:.6}", cell.score))
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

impl FromStr for Board {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board(s)
    }
}
