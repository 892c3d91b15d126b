use std::fmt;

use super::cell::Cell;
use super::direction::Direction;
use super::player::PlayerId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A length-2 segment on the corner lattice. `start` is the upper/left endpoint.
///
/// A horizontal wall from `(r, c)` to `(r, c + 2)` runs along the top edge of
/// cells `(r, c)` and `(r, c + 1)`. A vertical wall from `(r, c)` to `(r + 2, c)`
/// runs along the left edge of cells `(r, c)` and `(r + 1, c)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Wall {
    pub owner: PlayerId,
    pub start: Cell,
    pub end: Cell,
}

impl Wall {
    pub fn new(owner: PlayerId, start: Cell, end: Cell) -> Self {
        Self { owner, start, end }
    }

    pub fn horizontal(owner: PlayerId, row: usize, col: usize) -> Self {
        Self::new(owner, Cell::new(row, col), Cell::new(row, col + 2))
    }

    pub fn vertical(owner: PlayerId, row: usize, col: usize) -> Self {
        Self::new(owner, Cell::new(row, col), Cell::new(row + 2, col))
    }

    /// Row-aligned segments are horizontal. Only meaningful for well-formed walls.
    pub fn orientation(&self) -> Orientation {
        if self.start.row == self.end.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    /// Axis aligned, ascending endpoints, length exactly 2, inside the
    /// `[0, dim]` lattice and touching the outer border at most once.
    pub fn is_well_formed(&self, dim: usize) -> bool {
        let (start, end) = (self.start, self.end);
        if start.row != end.row && start.col != end.col {
            return false;
        }
        if end.row < start.row || end.col < start.col {
            return false;
        }
        if (end.row - start.row) + (end.col - start.col) != 2 {
            return false;
        }
        if [start.row, start.col, end.row, end.col]
            .iter()
            .any(|&coord| coord > dim)
        {
            return false;
        }

        let border_coords = [start.row, start.col, end.row, end.col]
            .iter()
            .filter(|&&coord| coord == 0 || coord == dim)
            .count();
        border_coords <= 1
    }

    /// Midpoint in doubled coordinates, so it stays integral.
    #[inline]
    fn doubled_midpoint(&self) -> (usize, usize) {
        (self.start.row + self.end.row, self.start.col + self.end.col)
    }

    #[inline]
    fn doubled(cell: Cell) -> (usize, usize) {
        (cell.row * 2, cell.col * 2)
    }

    /// Crossing walls share a midpoint; parallel walls overlap when one's
    /// midpoint is an endpoint of the other.
    pub fn intersects(&self, other: &Wall) -> bool {
        let midpoint = self.doubled_midpoint();
        if midpoint == other.doubled_midpoint() {
            return true;
        }

        self.orientation() == other.orientation()
            && (midpoint == Self::doubled(other.start) || midpoint == Self::doubled(other.end))
    }

    /// The four directed edges this wall removes. Requires a well-formed wall.
    pub fn blocked_edges(&self) -> [(Cell, Direction); 4] {
        let Cell { row, col } = self.start;
        match self.orientation() {
            Orientation::Horizontal => [
                (Cell::new(row, col), Direction::Up),
                (Cell::new(row, col + 1), Direction::Up),
                (Cell::new(row - 1, col), Direction::Down),
                (Cell::new(row - 1, col + 1), Direction::Down),
            ],
            Orientation::Vertical => [
                (Cell::new(row, col), Direction::Left),
                (Cell::new(row + 1, col), Direction::Left),
                (Cell::new(row, col - 1), Direction::Right),
                (Cell::new(row + 1, col - 1), Direction::Right),
            ],
        }
    }

    /// Whether stepping from `cell` in `direction` crosses this wall.
    pub fn blocks(&self, cell: Cell, direction: Direction) -> bool {
        let Cell { row, col } = self.start;
        match (self.orientation(), direction) {
            (Orientation::Horizontal, Direction::Up) => {
                cell.row == row && (cell.col == col || cell.col == col + 1)
            }
            (Orientation::Horizontal, Direction::Down) => {
                cell.row + 1 == row && (cell.col == col || cell.col == col + 1)
            }
            (Orientation::Vertical, Direction::Left) => {
                cell.col == col && (cell.row == row || cell.row == row + 1)
            }
            (Orientation::Vertical, Direction::Right) => {
                cell.col + 1 == col && (cell.row == row || cell.row == row + 1)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}
