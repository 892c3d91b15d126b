use thiserror::Error;

use super::cell::Cell;
use super::player::PlayerId;
use super::wall::Wall;
use crate::legality::WallError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board dimension {dim} is not supported")]
    UnsupportedDimension { dim: usize },
    #[error("A game needs 2 to 4 seats, got {count}")]
    UnsupportedPlayerCount { count: usize },
    #[error("Cell {cell} is outside the board")]
    CellOutOfBounds { cell: Cell },
    #[error("There is no seat {player}")]
    UnknownPlayer { player: PlayerId },
    #[error("Seat {player} has been eliminated and cannot move")]
    EliminatedPlayer { player: PlayerId },
    #[error("Cannot place wall {wall}: {reason}")]
    IllegalWall { wall: Wall, reason: WallError },
    #[error("Seat {player} has no walls left to place")]
    NoWallsRemaining { player: PlayerId },
    #[error("Seat {player} has no path to its goal")]
    NoPathToGoal { player: PlayerId },
}
