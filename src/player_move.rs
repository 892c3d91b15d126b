use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::cell::ParseCellError;
use crate::board::{Cell, PlayerId, Wall};

/// A single turn: relocate a pawn or place a wall.
///
/// A pawn move with `from == to` is a pass, produced only when a pawn has
/// nowhere to go.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PlayerMove {
    Pawn {
        player: PlayerId,
        from: Cell,
        to: Cell,
    },
    Wall(Wall),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected `<m|w> <seat> <r1>,<c1> <r2>,<c2>`, got `{0}`")]
    Malformed(String),
    #[error("unknown move kind `{0}`")]
    UnknownKind(String),
    #[error("invalid seat `{0}`")]
    InvalidSeat(String),
    #[error(transparent)]
    Cell(#[from] ParseCellError),
}

impl PlayerMove {
    pub fn pawn(player: PlayerId, from: Cell, to: Cell) -> Self {
        PlayerMove::Pawn { player, from, to }
    }

    pub fn pass(player: PlayerId, at: Cell) -> Self {
        PlayerMove::Pawn {
            player,
            from: at,
            to: at,
        }
    }

    pub fn player(&self) -> PlayerId {
        match self {
            PlayerMove::Pawn { player, .. } => *player,
            PlayerMove::Wall(wall) => wall.owner,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, PlayerMove::Pawn { from, to, .. } if from == to)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, PlayerMove::Wall(_))
    }

    /// Both endpoints: source and target for a pawn, the segment for a wall.
    pub fn endpoints(&self) -> (Cell, Cell) {
        match self {
            PlayerMove::Pawn { from, to, .. } => (*from, *to),
            PlayerMove::Wall(wall) => (wall.start, wall.end),
        }
    }

    /// `m` for a pawn, `w` for a wall.
    pub fn kind(&self) -> char {
        match self {
            PlayerMove::Pawn { .. } => 'm',
            PlayerMove::Wall(_) => 'w',
        }
    }
}

impl From<Wall> for PlayerMove {
    fn from(wall: Wall) -> Self {
        PlayerMove::Wall(wall)
    }
}

impl fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.endpoints();
        write!(f, "{} {} {} {}", self.kind(), self.player(), first, second)
    }
}

impl FromStr for PlayerMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(ParseMoveError::Malformed(s.to_string()));
        }

        let player: PlayerId = parts[1]
            .parse()
            .map_err(|_| ParseMoveError::InvalidSeat(parts[1].to_string()))?;
        let first: Cell = parts[2].parse()?;
        let second: Cell = parts[3].parse()?;

        match parts[0] {
            "m" => Ok(PlayerMove::pawn(player, first, second)),
            "w" => Ok(PlayerMove::Wall(Wall::new(player, first, second))),
            other => Err(ParseMoveError::UnknownKind(other.to_string())),
        }
    }
}
