//! Move enumeration for a single seat.
//!
//! Pawn moves come first, in direction order, followed by every legal wall.
//! Walls are checked lazily as the iterator is consumed, so a search that
//! prunes early never pays for the remaining legality checks.

use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, Cell, PlayerId, ALL_DIRECTIONS};
use crate::legality::check_wall;
use crate::player_move::PlayerMove;

use super::wall_candidates::WallCandidates;

/// A list of moves that is optimized for small sizes.
pub type MoveList = SmallVec<[PlayerMove; 8]>;

fn push_unique(targets: &mut SmallVec<[Cell; 8]>, cell: Cell) {
    if !targets.contains(&cell) {
        targets.push(cell);
    }
}

/// Cells the seat's pawn can reach this turn, including jumps over
/// adjacent pawns. Never an occupied cell.
pub fn pawn_targets(board: &Board, from: Cell) -> SmallVec<[Cell; 8]> {
    let mut targets = SmallVec::new();

    for direction in ALL_DIRECTIONS {
        let Some(adjacent) = board.neighbor(from, direction) else {
            continue;
        };
        if !board.is_occupied(adjacent) {
            push_unique(&mut targets, adjacent);
            continue;
        }

        match board.neighbor(adjacent, direction) {
            Some(beyond) if !board.is_occupied(beyond) => push_unique(&mut targets, beyond),
            _ => {
                for lateral in direction.perpendicular() {
                    if let Some(side) = board.neighbor(adjacent, lateral) {
                        if side != from && !board.is_occupied(side) {
                            push_unique(&mut targets, side);
                        }
                    }
                }
            }
        }
    }
    targets
}

/// Pawn moves for `player`, or a single pass when the pawn is boxed in.
/// Seats that are no longer in the game get no moves.
pub fn generate_pawn_moves(board: &Board, player: PlayerId) -> MoveList {
    let Some(from) = board.location(player) else {
        return MoveList::new();
    };

    let moves: MoveList = pawn_targets(board, from)
        .into_iter()
        .map(|to| PlayerMove::pawn(player, from, to))
        .collect();
    if moves.is_empty() {
        return smallvec::smallvec![PlayerMove::pass(player, from)];
    }
    moves
}

/// Lazy move sequence for one seat. Single pass; call [`generate_moves`]
/// again to re-enumerate.
pub struct Moves<'a> {
    board: &'a Board,
    pawn_moves: smallvec::IntoIter<[PlayerMove; 8]>,
    walls: Option<WallCandidates>,
}

impl<'a> Iterator for Moves<'a> {
    type Item = PlayerMove;

    fn next(&mut self) -> Option<PlayerMove> {
        if let Some(pawn_move) = self.pawn_moves.next() {
            return Some(pawn_move);
        }
        let board = self.board;
        self.walls
            .as_mut()?
            .find(|wall| check_wall(board, wall))
            .map(PlayerMove::Wall)
    }
}

/// All legal moves for `player`. Wall placements are included only while
/// the seat has walls left and `with_walls` is set.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn generate_moves(board: &Board, player: PlayerId, with_walls: bool) -> Moves<'_> {
    let pawn_moves = generate_pawn_moves(board, player);
    let walls = board
        .players()
        .get(player)
        .filter(|seat| with_walls && seat.is_active() && seat.walls_remaining > 0)
        .map(|_| WallCandidates::new(player, board.dim()));

    Moves {
        board,
        pawn_moves: pawn_moves.into_iter(),
        walls,
    }
}
