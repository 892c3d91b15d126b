use crate::board::{Orientation, PlayerId, Wall};

/// Every wall position on a `dim` board: vertical walls column by column,
/// then horizontal walls row by row. Candidates are not checked for legality.
#[derive(Clone, Debug)]
pub struct WallCandidates {
    owner: PlayerId,
    dim: usize,
    orientation: Orientation,
    outer: usize,
    inner: usize,
}

impl WallCandidates {
    pub fn new(owner: PlayerId, dim: usize) -> Self {
        Self {
            owner,
            dim,
            orientation: Orientation::Vertical,
            outer: 1,
            inner: 0,
        }
    }

    /// Number of positions enumerated for a `dim` board.
    pub fn total(dim: usize) -> usize {
        2 * (dim - 1) * (dim - 1)
    }
}

impl Iterator for WallCandidates {
    type Item = Wall;

    fn next(&mut self) -> Option<Wall> {
        loop {
            if self.outer >= self.dim {
                match self.orientation {
                    Orientation::Vertical => {
                        self.orientation = Orientation::Horizontal;
                        self.outer = 1;
                        self.inner = 0;
                    }
                    Orientation::Horizontal => return None,
                }
            }
            if self.inner + 1 >= self.dim {
                self.outer += 1;
                self.inner = 0;
                continue;
            }

            let (outer, inner) = (self.outer, self.inner);
            self.inner += 1;
            return Some(match self.orientation {
                Orientation::Vertical => Wall::vertical(self.owner, inner, outer),
                Orientation::Horizontal => Wall::horizontal(self.owner, outer, inner),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_enumerates_every_position_once() {
        let walls: Vec<Wall> = WallCandidates::new(1, 9).collect();
        assert_eq!(WallCandidates::total(9), walls.len());
        assert_eq!(128, walls.len());
        assert!(walls.iter().all(|wall| wall.is_well_formed(9)));
        assert!(walls.iter().all(|wall| wall.owner == 1));

        let unique: std::collections::HashSet<_> = walls.iter().collect();
        assert_eq!(walls.len(), unique.len());
    }

    #[test]
    fn test_order() {
        let walls: Vec<Wall> = WallCandidates::new(0, 3).collect();
        assert_eq!(
            vec![
                Wall::vertical(0, 0, 1),
                Wall::vertical(0, 1, 1),
                Wall::vertical(0, 0, 2),
                Wall::vertical(0, 1, 2),
                Wall::horizontal(0, 1, 0),
                Wall::horizontal(0, 1, 1),
                Wall::horizontal(0, 2, 0),
                Wall::horizontal(0, 2, 1),
            ],
            walls
        );
        assert_eq!(Cell::new(3, 1), walls[1].end);
    }
}
