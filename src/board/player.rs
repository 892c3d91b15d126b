use super::cell::Cell;

/// Seat index in turn order, 0-based.
pub type PlayerId = usize;

/// The edge a seat races toward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Goal {
    BottomRow,
    TopRow,
    RightColumn,
    LeftColumn,
}

impl Goal {
    /// Seats 0 and 1 race vertically, seats 2 and 3 horizontally.
    pub fn for_seat(seat: PlayerId) -> Self {
        match seat % 4 {
            0 => Goal::BottomRow,
            1 => Goal::TopRow,
            2 => Goal::RightColumn,
            _ => Goal::LeftColumn,
        }
    }

    #[inline]
    pub fn is_reached(self, cell: Cell, dim: usize) -> bool {
        match self {
            Goal::BottomRow => cell.row == dim - 1,
            Goal::TopRow => cell.row == 0,
            Goal::RightColumn => cell.col == dim - 1,
            Goal::LeftColumn => cell.col == 0,
        }
    }

    /// Straight-line distance to the goal edge. Admissible for A*.
    #[inline]
    pub fn distance(self, cell: Cell, dim: usize) -> usize {
        match self {
            Goal::BottomRow => dim - 1 - cell.row,
            Goal::TopRow => cell.row,
            Goal::RightColumn => dim - 1 - cell.col,
            Goal::LeftColumn => cell.col,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Player {
    pub id: PlayerId,
    /// `None` for a seat that never had a pawn on the board.
    pub location: Option<Cell>,
    pub walls_remaining: u8,
    pub goal: Goal,
    pub eliminated: bool,
}

impl Player {
    pub fn new(id: PlayerId, location: Option<Cell>, walls_remaining: u8) -> Self {
        Self {
            id,
            location,
            walls_remaining,
            goal: Goal::for_seat(id),
            eliminated: location.is_none(),
        }
    }

    /// Active players take turns, block pawns and need a path to their goal.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.eliminated && self.location.is_some()
    }

    /// The cell this player blocks, if any.
    #[inline]
    pub fn active_location(&self) -> Option<Cell> {
        if self.eliminated {
            None
        } else {
            self.location
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_table() {
        assert_eq!(Goal::BottomRow, Goal::for_seat(0));
        assert_eq!(Goal::TopRow, Goal::for_seat(1));
        assert_eq!(Goal::RightColumn, Goal::for_seat(2));
        assert_eq!(Goal::LeftColumn, Goal::for_seat(3));
    }

    #[test]
    fn test_goal_distance_matches_reached() {
        for goal in [
            Goal::BottomRow,
            Goal::TopRow,
            Goal::RightColumn,
            Goal::LeftColumn,
        ] {
            for row in 0..9 {
                for col in 0..9 {
                    let cell = Cell::new(row, col);
                    assert_eq!(goal.is_reached(cell, 9), goal.distance(cell, 9) == 0);
                }
            }
        }
    }

    #[test]
    fn test_absent_seat_is_inactive() {
        let absent = Player::new(2, None, 5);
        assert!(!absent.is_active());
        assert_eq!(None, absent.active_location());

        let mut present = Player::new(0, Some(Cell::new(0, 4)), 10);
        assert!(present.is_active());
        present.eliminated = true;
        assert!(!present.is_active());
        assert_eq!(Some(Cell::new(0, 4)), present.location);
    }
}
