//! Quoridor-specific trait implementations for the alpha-beta search.

use log::debug;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, GameMove, GameState, MoveGenerator, SearchContext, SearchError,
};
use crate::board::{Board, BoardError, PlayerId};
use crate::evaluate;
use crate::move_generator::{generate_moves, Moves};
use crate::player_move::PlayerMove;

impl GameState for Board {
    type Player = PlayerId;

    #[inline]
    fn winner(&self) -> Option<PlayerId> {
        Board::winner(self)
    }

    #[inline]
    fn next_turn(&self, current: PlayerId) -> Option<PlayerId> {
        self.next_active_seat(current)
    }
}

impl GameMove for PlayerMove {
    type State = Board;
    type Error = BoardError;

    #[inline]
    fn apply(&self, state: &mut Board) -> Result<(), BoardError> {
        state.apply_move(self).map(|_| ())
    }
}

/// How far to look ahead and how much of the opponents' options to consider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchPolicy {
    pub depth: u8,
    /// Whether minimizing seats may place walls. The maximizing seat always may.
    pub opponent_walls: bool,
}

impl SearchPolicy {
    /// Head to head, walls dominate the branching factor, so search shallow
    /// but complete. With more seats, look one full round ahead and let the
    /// opponents only move their pawns.
    pub fn for_players(active: usize) -> Self {
        if active <= 2 {
            Self {
                depth: 2,
                opponent_walls: true,
            }
        } else {
            Self {
                depth: active as u8,
                opponent_walls: false,
            }
        }
    }
}

/// Enumerates moves for the search, optionally without opponent walls.
#[derive(Clone, Copy, Debug)]
pub struct QuoridorMoveGenerator {
    maximizing_player: PlayerId,
    opponent_walls: bool,
}

impl QuoridorMoveGenerator {
    pub fn new(maximizing_player: PlayerId, opponent_walls: bool) -> Self {
        Self {
            maximizing_player,
            opponent_walls,
        }
    }
}

impl MoveGenerator<Board> for QuoridorMoveGenerator {
    type Move = PlayerMove;
    type Moves<'a> = Moves<'a>;

    #[inline]
    fn generate_moves<'a>(&'a self, state: &'a Board, player: PlayerId) -> Moves<'a> {
        let with_walls = player == self.maximizing_player || self.opponent_walls;
        generate_moves(state, player, with_walls)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QuoridorEvaluator;

impl Evaluator<Board> for QuoridorEvaluator {
    type Error = BoardError;

    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, state: &Board, maximizing: PlayerId) -> Result<i32, BoardError> {
        evaluate::score(state, maximizing)
    }

    #[inline]
    fn terminal_score(&self, winner: PlayerId, maximizing: PlayerId) -> i32 {
        evaluate::terminal_score(winner, maximizing)
    }
}

/// Searches for `player`'s best move under `policy`.
///
/// Returns `Ok(None)` when there is nothing to search against: the seat is
/// out of the game or no opponent is left.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext<PlayerMove>,
    board: &Board,
    player: PlayerId,
    policy: SearchPolicy,
) -> Result<Option<(PlayerMove, i32)>, SearchError> {
    if board.location(player).is_none() {
        debug!("seat {} is not on the board, nothing to search", player);
        return Ok(None);
    }
    if board.active_count() < 2 {
        debug!("no active opponents left for seat {}", player);
        return Ok(None);
    }

    context.set_search_depth(policy.depth);
    let move_generator = QuoridorMoveGenerator::new(player, policy.opponent_walls);
    alpha_beta_search(context, board, &move_generator, &QuoridorEvaluator, player).map(Some)
}
