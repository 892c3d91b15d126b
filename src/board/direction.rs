use super::cell::Cell;

/// One of the four orthogonal directions a pawn can step in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Enumeration order used everywhere moves or paths are expanded.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

pub const UP: u8 = 0x1;
pub const RIGHT: u8 = 0x2;
pub const DOWN: u8 = 0x4;
pub const LEFT: u8 = 0x8;

impl Direction {
    /// Bit used for this direction in a cell's blocked-edge mask.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Direction::Up => UP,
            Direction::Right => RIGHT,
            Direction::Down => DOWN,
            Direction::Left => LEFT,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if they are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        if from.col == to.col {
            if to.row + 1 == from.row {
                return Some(Direction::Up);
            }
            if from.row + 1 == to.row {
                return Some(Direction::Down);
            }
        } else if from.row == to.row {
            if to.col + 1 == from.col {
                return Some(Direction::Left);
            }
            if from.col + 1 == to.col {
                return Some(Direction::Right);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between() {
        let center = Cell::new(4, 4);
        assert_eq!(Some(Direction::Up), Direction::between(center, Cell::new(3, 4)));
        assert_eq!(Some(Direction::Down), Direction::between(center, Cell::new(5, 4)));
        assert_eq!(Some(Direction::Left), Direction::between(center, Cell::new(4, 3)));
        assert_eq!(Some(Direction::Right), Direction::between(center, Cell::new(4, 5)));
        assert_eq!(None, Direction::between(center, Cell::new(5, 5)));
        assert_eq!(None, Direction::between(center, Cell::new(6, 4)));
        assert_eq!(None, Direction::between(center, center));
    }

    #[test]
    fn test_bits_are_distinct() {
        let mask = ALL_DIRECTIONS.iter().fold(0u8, |mask, d| mask | d.bit());
        assert_eq!(0xF, mask);
        for direction in ALL_DIRECTIONS {
            assert_eq!(direction, direction.opposite().opposite());
        }
    }
}
