use std::fmt;

use super::cell::Cell;
use super::direction::Direction;
use super::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dim = self.dim();

        write!(f, "   ")?;
        for col in 0..dim {
            write!(f, " {:^3}", col)?;
        }
        writeln!(f)?;
        writeln!(f, "   +{}", "---+".repeat(dim))?;

        for row in 0..dim {
            write!(f, "{:>2} |", row)?;
            for col in 0..dim {
                let cell = Cell::new(row, col);
                match self.occupant(cell) {
                    Some(seat) => write!(f, " {} ", seat)?,
                    None => write!(f, " . ")?,
                }
                let separator = if self.is_open(cell, Direction::Right) {
                    ' '
                } else {
                    '|'
                };
                write!(f, "{}", separator)?;
            }
            writeln!(f)?;

            write!(f, "   +")?;
            for col in 0..dim {
                let edge = if self.is_open(Cell::new(row, col), Direction::Down) {
                    "   "
                } else {
                    "---"
                };
                write!(f, "{}+", edge)?;
            }
            writeln!(f)?;
        }

        for player in self.players() {
            let status = if player.eliminated {
                "eliminated".to_string()
            } else {
                format!("{} walls", player.walls_remaining)
            };
            match player.location {
                Some(cell) => writeln!(f, "seat {} at {} ({})", player.id, cell, status)?,
                None => writeln!(f, "seat {} absent", player.id)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::wall::Wall;

    #[test]
    fn test_display_shows_pawns_and_walls() {
        let mut board = Board::new(3, 2, &[Some(Cell::new(0, 1)), Some(Cell::new(2, 1))]).unwrap();
        board.place_wall(Wall::vertical(0, 0, 1)).unwrap();

        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!("     0   1   2 ", lines[0]);
        assert_eq!("   +---+---+---+", lines[1]);
        assert_eq!(" 0 | . | 0   . |", lines[2]);
        assert_eq!(" 1 | . | .   . |", lines[4]);
        assert_eq!(" 2 | .   1   . |", lines[6]);
        assert!(rendered.contains("seat 0 at 0,1 (1 walls)"));
    }
}
