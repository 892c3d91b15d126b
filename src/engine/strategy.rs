//! Pluggable move selection. The engine asks each selector in turn and
//! takes the first move offered.

use std::time::Duration;

use log::{debug, warn};
use rand::RngCore;
use thiserror::Error;

use crate::alpha_beta_searcher::SearchContext;
use crate::board::{Board, Cell, PlayerId};
use crate::legality::check_wall;
use crate::move_generator::pawn_targets;
use crate::player_move::PlayerMove;
use crate::quoridor_search::{search_best_move, SearchPolicy};
use crate::remote::{RemoteError, RemoteSolver};

use super::greedy::greedy_path_move;
use super::{EngineError, SearchStats};

#[derive(Error, Debug)]
pub enum SelectorError {
    /// The selector cannot help for the rest of the game. The engine drops
    /// it and asks the next one.
    #[error("selector unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Fatal(#[from] EngineError),
}

impl From<RemoteError> for SelectorError {
    fn from(error: RemoteError) -> Self {
        SelectorError::Unavailable(error.to_string())
    }
}

pub trait MoveSelector {
    fn name(&self) -> &'static str;

    /// Called after every confirmed move, once the board reflects it.
    fn observe_move(&mut self, _board: &Board, _player_move: &PlayerMove) -> Result<(), SelectorError> {
        Ok(())
    }

    fn observe_invalidation(&mut self, _seat: PlayerId) -> Result<(), SelectorError> {
        Ok(())
    }

    /// A move for `seat`, or `None` to defer to the next selector.
    fn select_move(
        &mut self,
        board: &Board,
        seat: PlayerId,
        rng: &mut dyn RngCore,
    ) -> Result<Option<PlayerMove>, SelectorError>;

    fn search_stats(&self) -> Option<SearchStats> {
        None
    }
}

/// Local alpha-beta search.
pub struct SearchSelector {
    context: SearchContext<PlayerMove>,
    policy: Option<SearchPolicy>,
}

impl SearchSelector {
    /// With no `policy`, depth and opponent walls follow the number of seats
    /// still in the game.
    pub fn new(policy: Option<SearchPolicy>) -> Self {
        let depth = policy.map_or(2, |policy| policy.depth);
        Self {
            context: SearchContext::new(depth),
            policy,
        }
    }
}

impl MoveSelector for SearchSelector {
    fn name(&self) -> &'static str {
        "search"
    }

    fn select_move(
        &mut self,
        board: &Board,
        seat: PlayerId,
        _rng: &mut dyn RngCore,
    ) -> Result<Option<PlayerMove>, SelectorError> {
        let policy = self
            .policy
            .unwrap_or_else(|| SearchPolicy::for_players(board.active_count()));
        let result = search_best_move(&mut self.context, board, seat, policy)
            .map_err(|error| EngineError::SearchError { error })?;
        Ok(result.map(|(best_move, score)| {
            debug!("search picked {} with score {}", best_move, score);
            best_move
        }))
    }

    fn search_stats(&self) -> Option<SearchStats> {
        Some(SearchStats {
            positions_searched: self.context.searched_position_count(),
            cutoffs: self.context.cutoff_count(),
            depth: self.context.search_depth(),
            last_score: self.context.last_score(),
            last_search_duration: self.context.last_search_duration(),
        })
    }
}

/// Path-following fallback. Always has an answer for a seat in the game.
#[derive(Default)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select_move(
        &mut self,
        board: &Board,
        seat: PlayerId,
        rng: &mut dyn RngCore,
    ) -> Result<Option<PlayerMove>, SelectorError> {
        greedy_path_move(board, seat, rng)
            .map_err(|error| SelectorError::Fatal(EngineError::BoardError { error }))
    }
}

/// Delegates to a remote solver. Any channel failure or unusable reply
/// makes it unavailable.
pub struct RemoteSelector {
    solver: RemoteSolver,
}

impl RemoteSelector {
    pub fn new(solver: RemoteSolver) -> Self {
        Self { solver }
    }
}

impl MoveSelector for RemoteSelector {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn observe_move(&mut self, _board: &Board, player_move: &PlayerMove) -> Result<(), SelectorError> {
        Ok(self.solver.send_move(player_move)?)
    }

    fn observe_invalidation(&mut self, seat: PlayerId) -> Result<(), SelectorError> {
        Ok(self.solver.send_invalidate(seat)?)
    }

    fn select_move(
        &mut self,
        board: &Board,
        seat: PlayerId,
        _rng: &mut dyn RngCore,
    ) -> Result<Option<PlayerMove>, SelectorError> {
        let proposed = self.solver.request_move(seat)?;
        if !is_playable(board, &proposed) {
            warn!("remote solver proposed an illegal move: {}", proposed);
            return Err(SelectorError::Unavailable(format!(
                "illegal move from remote solver: {}",
                proposed
            )));
        }
        Ok(Some(proposed))
    }
}

/// Whether `player_move` could be generated for its seat on `board`.
fn is_playable(board: &Board, player_move: &PlayerMove) -> bool {
    match player_move {
        PlayerMove::Pawn { player, from, to } => {
            let Some(location) = board.location(*player) else {
                return false;
            };
            if location != *from {
                return false;
            }
            let targets = pawn_targets(board, location);
            targets.contains(to) || (targets.is_empty() && from == to)
        }
        PlayerMove::Wall(wall) => {
            let has_walls = board
                .player(wall.owner)
                .map_or(false, |seat| seat.is_active() && seat.walls_remaining > 0);
            has_walls && check_wall(board, wall)
        }
    }
}

/// How long a remote solver may take to accept a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(9500);

/// Connects to the solver at `address`. A failure is logged and leaves the
/// engine to local selection.
pub fn connect_remote(
    address: &str,
    connect_timeout: Duration,
    reply_timeout: Option<Duration>,
    seat: PlayerId,
    walls: u8,
    positions: &[Option<Cell>],
) -> Option<RemoteSelector> {
    match RemoteSolver::connect(address, connect_timeout, reply_timeout, seat, walls, positions) {
        Ok(solver) => Some(RemoteSelector::new(solver)),
        Err(error) => {
            warn!("remote solver at {} unavailable: {}", address, error);
            None
        }
    }
}
