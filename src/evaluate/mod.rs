use crate::board::{Board, BoardError, PlayerId};
use crate::pathfinder::distance_to_goal;

// Larger than any sum of path lengths on a supported board, so a reached
// goal always outweighs the heuristic.
pub const WIN_SCORE: i32 = i32::MAX / 2;
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Heuristic value of `board` for `player`: opponents' remaining path lengths
/// count for it, its own counts against it. Eliminated seats contribute nothing.
///
/// A seat with no route to its goal breaks the board invariant and is
/// reported as [`BoardError::NoPathToGoal`].
pub fn score(board: &Board, player: PlayerId) -> Result<i32, BoardError> {
    let mut total = 0i32;
    for seat in board.active_players() {
        let distance = distance_to_goal(board, seat.id)
            .ok_or(BoardError::NoPathToGoal { player: seat.id })? as i32;
        if seat.id == player {
            total -= distance;
        } else {
            total += distance;
        }
    }
    Ok(total)
}

/// Score of a finished game from `player`'s point of view.
pub fn terminal_score(winner: PlayerId, player: PlayerId) -> i32 {
    if winner == player {
        WIN_SCORE
    } else {
        LOSS_SCORE
    }
}
