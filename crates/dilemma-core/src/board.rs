//! Board Types
//!
//! Strategies, cells, coordinates and the rectangular board they live on.
//!
//! A [`Board`] is a value: the engine never mutates a published generation,
//! it builds a brand-new board for the next one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::{SimError, SimResult};

/// The two strategies an agent can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Strategy {
    /// Returns the single-character symbol used in board files.
    pub fn symbol(self) -> char {
        match self {
            Strategy::Cooperate => 'C',
            Strategy::Defect => 'D',
        }
    }

    /// Parses a board-file symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'C' => Some(Strategy::Cooperate),
            'D' => Some(Strategy::Defect),
            _ => None,
        }
    }

}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single agent: its strategy and the score accumulated this round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub strategy: Strategy,
    pub score: f64,
}

impl Cell {
    /// Creates a cell with a zero score.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            score: 0.0,
        }
    }
}

/// A (row, column) position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Largest cell count a board may hold.
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Cell>();

/// Board size. Both dimensions are at least one and the cell count is
/// addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    /// Validates and creates a board size.
    pub fn new(rows: usize, cols: usize) -> SimResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SimError::EmptyDimensions { rows, cols });
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(Self { rows, cols }),
            _ => Err(SimError::TooManyCells { rows, cols }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// True for the degenerate 1x1 board on which no game can be played.
    pub fn is_single_cell(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Row-major offset of a coordinate, or `OutOfBounds`.
    pub fn index_of(&self, coord: Coord) -> SimResult<usize> {
        if !self.contains(coord) {
            return Err(SimError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(coord.row * self.cols + coord.col)
    }

    /// Coordinate at a row-major offset. Caller guarantees `index < cell_count()`.
    pub(crate) fn coord_at(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    /// Iterates over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.cell_count()).map(move |i| Coord::new(i / cols, i % cols))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A rectangular grid of agents stored in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Allocates a board whose strategies are still unset.
    ///
    /// The returned builder must have every cell assigned before
    /// [`BoardBuilder::build`] succeeds.
    pub fn initialize(rows: usize, cols: usize) -> SimResult<BoardBuilder> {
        Ok(BoardBuilder::new(Dimensions::new(rows, cols)?))
    }

    /// Creates a board where every agent holds the same strategy.
    pub fn filled(dims: Dimensions, strategy: Strategy) -> Self {
        Self {
            dims,
            cells: vec![Cell::new(strategy); dims.cell_count()],
        }
    }

    /// Creates a board from nested rows of strategies.
    pub fn from_rows(rows: Vec<Vec<Strategy>>) -> SimResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let dims = Dimensions::new(rows.len(), cols)?;

        let mut cells = Vec::with_capacity(dims.cell_count());
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(SimError::RaggedRows {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row.into_iter().map(Cell::new));
        }

        Ok(Self { dims, cells })
    }

    /// Assembles a board from row-major cells. Caller guarantees the length.
    pub(crate) fn from_cells(dims: Dimensions, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self { dims, cells }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Returns the cell at a coordinate, if it is on the board.
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.dims
            .index_of(coord)
            .ok()
            .map(|index| &self.cells[index])
    }

    /// Returns the cell at a coordinate, or `OutOfBounds`.
    pub fn cell(&self, coord: Coord) -> SimResult<&Cell> {
        let index = self.dims.index_of(coord)?;
        Ok(&self.cells[index])
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.dims.cols;
        &self.cells[start..start + self.dims.cols]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterates over `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.dims.coords().zip(self.cells.iter())
    }

    /// Returns a copy of this board with every score set to zero.
    pub fn with_scores_reset(&self) -> Self {
        Self {
            dims: self.dims,
            cells: self.cells.iter().map(|c| Cell::new(c.strategy)).collect(),
        }
    }

    /// Number of agents holding the given strategy.
    pub fn count(&self, strategy: Strategy) -> usize {
        self.cells.iter().filter(|c| c.strategy == strategy).count()
    }

    /// Share of cooperators in `[0, 1]`.
    pub fn cooperation_fraction(&self) -> f64 {
        self.count(Strategy::Cooperate) as f64 / self.dims.cell_count() as f64
    }

    /// Sum of all scores on the board.
    pub fn total_score(&self) -> f64 {
        self.cells.iter().map(|c| c.score).sum()
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        match self.dims.index_of(coord) {
            Ok(index) => &self.cells[index],
            Err(e) => panic!("{}", e),
        }
    }
}

/// A board whose strategies are still being filled in.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    dims: Dimensions,
    strategies: Vec<Option<Strategy>>,
}

impl BoardBuilder {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            strategies: vec![None; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Assigns a strategy to one cell.
    pub fn set(&mut self, coord: Coord, strategy: Strategy) -> SimResult<&mut Self> {
        let index = self.dims.index_of(coord)?;
        self.strategies[index] = Some(strategy);
        Ok(self)
    }

    /// Assigns the same strategy to every cell not yet set.
    pub fn fill_unset(&mut self, strategy: Strategy) -> &mut Self {
        for slot in self.strategies.iter_mut().filter(|s| s.is_none()) {
            *slot = Some(strategy);
        }
        self
    }

    /// Finishes the board, failing on the first unset cell in row-major order.
    pub fn build(self) -> SimResult<Board> {
        let dims = self.dims;
        let cells = self
            .strategies
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.map(Cell::new)
                    .ok_or_else(|| SimError::UnsetCell(dims.coord_at(i)))
            })
            .collect::<SimResult<Vec<_>>>()?;

        Ok(Board { dims, cells })
    }
}
