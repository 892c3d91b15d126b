use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::direction::Direction;

static CELL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+),(\d+)$").expect("cell pattern is a valid regex"));

/// A grid position. Also used for wall endpoints, which live on the
/// `(dim + 1) x (dim + 1)` lattice of cell corners.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cell `{0}`, expected <row>,<col>")]
pub struct ParseCellError(pub String);

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn is_within(self, dim: usize) -> bool {
        self.row < dim && self.col < dim
    }

    #[inline]
    pub fn index(self, dim: usize) -> usize {
        self.row * dim + self.col
    }

    #[inline]
    pub fn from_index(index: usize, dim: usize) -> Self {
        Self::new(index / dim, index % dim)
    }

    /// The orthogonal neighbor in `direction`, or `None` when it would leave the grid.
    #[inline]
    pub fn step(self, direction: Direction, dim: usize) -> Option<Cell> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Cell::new(row, self.col)),
            Direction::Down => (self.row + 1 < dim).then(|| Cell::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Cell::new(self.row, col)),
            Direction::Right => (self.col + 1 < dim).then(|| Cell::new(self.row, self.col + 1)),
        }
    }

    pub fn manhattan_distance(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CELL_PATTERN
            .captures(s.trim())
            .ok_or_else(|| ParseCellError(s.to_string()))?;
        let row = caps[1].parse().map_err(|_| ParseCellError(s.to_string()))?;
        let col = caps[2].parse().map_err(|_| ParseCellError(s.to_string()))?;
        Ok(Cell::new(row, col))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_on_grid() {
        let corner = Cell::new(0, 0);
        assert_eq!(None, corner.step(Direction::Up, 9));
        assert_eq!(None, corner.step(Direction::Left, 9));
        assert_eq!(Some(Cell::new(1, 0)), corner.step(Direction::Down, 9));
        assert_eq!(Some(Cell::new(0, 1)), corner.step(Direction::Right, 9));

        let far_corner = Cell::new(8, 8);
        assert_eq!(None, far_corner.step(Direction::Down, 9));
        assert_eq!(None, far_corner.step(Direction::Right, 9));
    }

    #[test]
    fn test_parse_and_display() {
        let cell: Cell = "3,7".parse().unwrap();
        assert_eq!(Cell::new(3, 7), cell);
        assert_eq!("3,7", cell.to_string());
        assert!("3;7".parse::<Cell>().is_err());
        assert!("-1,2".parse::<Cell>().is_err());
    }

    #[test]
    fn test_index_round_trip() {
        let cell = Cell::new(4, 6);
        assert_eq!(42, cell.index(9));
        assert_eq!(cell, Cell::from_index(42, 9));
    }
}
