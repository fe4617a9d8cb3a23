//! Neighbor Locator
//!
//! Moore (8-cell) neighborhoods clipped to the board edges.
//!
//! Neighbors are always enumerated in the fixed order of [`Direction::ALL`].
//! The imitation rule breaks score ties in favor of the earlier candidate, so
//! this order is part of the engine's observable behavior.

use crate::board::{Coord, Dimensions};
use crate::error::{SimError, SimResult};

/// One of the eight compass directions around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    SouthWest,
    West,
    NorthWest,
    SouthEast,
    East,
    NorthEast,
}

impl Direction {
    /// Enumeration order used by the locator.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::East,
        Direction::NorthEast,
    ];

    /// Row and column offsets of this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::NorthEast => (-1, 1),
        }
    }

    /// Steps from `coord` in this direction, if the result stays on the board.
    pub fn step(self, coord: Coord, dims: Dimensions) -> Option<Coord> {
        let (dr, dc) = self.offset();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        dims.contains(next).then_some(next)
    }
}

/// Where a cell sits relative to the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Interior,
    Edge,
    Corner,
    /// On a board that is a single row or a single column
    Line,
}

impl Placement {
    /// Classifies a coordinate. Caller guarantees it is on the board.
    pub fn of(coord: Coord, dims: Dimensions) -> Self {
        if dims.rows() == 1 || dims.cols() == 1 {
            return Placement::Line;
        }
        let on_row_edge = coord.row == 0 || coord.row == dims.rows() - 1;
        let on_col_edge = coord.col == 0 || coord.col == dims.cols() - 1;
        match (on_row_edge, on_col_edge) {
            (true, true) => Placement::Corner,
            (true, false) | (false, true) => Placement::Edge,
            (false, false) => Placement::Interior,
        }
    }
}

/// The in-bounds neighbors of one cell, at most eight.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    coords: [Coord; 8],
    len: usize,
}

impl Neighbors {
    fn empty() -> Self {
        Self {
            coords: [Coord::new(0, 0); 8],
            len: 0,
        }
    }

    fn push(&mut self, coord: Coord) {
        self.coords[self.len] = coord;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.coords[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.as_slice().iter()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.as_slice().contains(&coord)
    }
}

impl PartialEq for Neighbors {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Neighbors {}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns the in-bounds Moore neighbors of `coord`.
///
/// A 1x1 board has no neighbors at all and is rejected with
/// [`SimError::SingleCell`]; a coordinate off the board is rejected with
/// [`SimError::OutOfBounds`].
pub fn neighbors(coord: Coord, dims: Dimensions) -> SimResult<Neighbors> {
    if dims.is_single_cell() {
        return Err(SimError::SingleCell);
    }
    if !dims.contains(coord) {
        return Err(SimError::OutOfBounds {
            coord,
            rows: dims.rows(),
            cols: dims.cols(),
        });
    }

    let mut found = Neighbors::empty();
    for direction in Direction::ALL {
        if let Some(next) = direction.step(coord, dims) {
            found.push(next);
        }
    }
    Ok(found)
}

/// Precomputed neighbor sets for every cell of a board size.
#[derive(Debug, Clone)]
pub struct NeighborTable {
    dims: Dimensions,
    entries: Vec<Neighbors>,
}

impl NeighborTable {
    /// Builds the table, failing for a 1x1 board.
    pub fn new(dims: Dimensions) -> SimResult<Self> {
        let entries = dims
            .coords()
            .map(|coord| neighbors(coord, dims))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self { dims, entries })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Neighbors of the cell at a row-major offset.
    pub fn at_index(&self, index: usize) -> &Neighbors {
        &self.entries[index]
    }

    pub fn get(&self, coord: Coord) -> SimResult<&Neighbors> {
        let index = self.dims.index_of(coord)?;
        Ok(&self.entries[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: usize, cols: usize) -> Dimensions {
        Dimensions::new(rows, cols).unwrap()
    }

    #[test]
    fn test_interior_order_is_fixed() {
        let found = neighbors(Coord::new(1, 1), dims(3, 3)).unwrap();
        assert_eq!(
            found.as_slice(),
            &[
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(2, 0),
                Coord::new(1, 0),
                Coord::new(0, 0),
                Coord::new(2, 2),
                Coord::new(1, 2),
                Coord::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_top_left_corner() {
        let found = neighbors(Coord::new(0, 0), dims(4, 5)).unwrap();
        assert_eq!(
            found.as_slice(),
            &[Coord::new(1, 0), Coord::new(1, 1), Coord::new(0, 1)]
        );
    }

    #[test]
    fn test_bottom_right_corner() {
        let found = neighbors(Coord::new(3, 4), dims(4, 5)).unwrap();
        assert_eq!(
            found.as_slice(),
            &[Coord::new(2, 4), Coord::new(3, 3), Coord::new(2, 3)]
        );
    }

    #[test]
    fn test_edges_have_five() {
        let d = dims(4, 5);
        for coord in [
            Coord::new(0, 2),
            Coord::new(3, 2),
            Coord::new(2, 0),
            Coord::new(2, 4),
        ] {
            let found = neighbors(coord, d).unwrap();
            assert_eq!(found.len(), 5, "edge cell {}", coord);
            assert_eq!(Placement::of(coord, d), Placement::Edge);
        }
    }

    #[test]
    fn test_single_row_board() {
        let d = dims(1, 3);
        assert_eq!(
            neighbors(Coord::new(0, 0), d).unwrap().as_slice(),
            &[Coord::new(0, 1)]
        );
        assert_eq!(
            neighbors(Coord::new(0, 1), d).unwrap().as_slice(),
            &[Coord::new(0, 0), Coord::new(0, 2)]
        );
        assert_eq!(Placement::of(Coord::new(0, 1), d), Placement::Line);
    }

    #[test]
    fn test_single_column_board() {
        let d = dims(3, 1);
        assert_eq!(
            neighbors(Coord::new(1, 0), d).unwrap().as_slice(),
            &[Coord::new(0, 0), Coord::new(2, 0)]
        );
    }

    #[test]
    fn test_single_cell_is_an_error() {
        assert_eq!(
            neighbors(Coord::new(0, 0), dims(1, 1)),
            Err(SimError::SingleCell)
        );
        assert!(NeighborTable::new(dims(1, 1)).is_err());
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let err = neighbors(Coord::new(3, 0), dims(3, 3)).unwrap_err();
        assert_eq!(
            err,
            SimError::OutOfBounds {
                coord: Coord::new(3, 0),
                rows: 3,
                cols: 3
            }
        );
    }

    #[test]
    fn test_table_matches_locator() {
        let d = dims(4, 6);
        let table = NeighborTable::new(d).unwrap();
        for (index, coord) in d.coords().enumerate() {
            let direct = neighbors(coord, d).unwrap();
            assert_eq!(table.at_index(index), &direct);
            assert_eq!(table.get(coord).unwrap(), &direct);
        }
    }

    #[test]
    fn test_direction_step_clips() {
        let d = dims(2, 2);
        assert_eq!(Direction::North.step(Coord::new(0, 0), d), None);
        assert_eq!(Direction::West.step(Coord::new(1, 0), d), None);
        assert_eq!(
            Direction::SouthEast.step(Coord::new(0, 0), d),
            Some(Coord::new(1, 1))
        );
    }
}
