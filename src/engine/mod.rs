//! The agent as the host game sees it: it is told about every confirmed
//! move and invalidation, and answers move requests.

pub mod greedy;
pub mod strategy;

use std::time::Duration;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::alpha_beta_searcher::SearchError;
use crate::board::{Board, BoardError, Cell, CellList, PlayerId};
use crate::pathfinder::{path_between, Path};
use crate::player_move::PlayerMove;
use crate::quoridor_search::SearchPolicy;

use strategy::{
    connect_remote, GreedySelector, MoveSelector, SearchSelector, SelectorError,
    DEFAULT_CONNECT_TIMEOUT,
};

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Fixed search policy. `None` adapts it to the seats left in the game.
    pub search_policy: Option<SearchPolicy>,
    /// Solver to delegate move requests to, as `host` or `host:port`.
    pub remote_address: Option<String>,
    pub connect_timeout: Duration,
    /// Bound on each solver reply once connected. `None` waits for as long
    /// as the solver searches.
    pub reply_timeout: Option<Duration>,
    /// Seed for wall proposals. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_policy: None,
            remote_address: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            reply_timeout: None,
            seed: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Board error: {error}")]
    BoardError { error: BoardError },
    #[error("Search error: {error}")]
    SearchError { error: SearchError },
    #[error("Seat {seat} is not part of this game")]
    UnknownSeat { seat: PlayerId },
    #[error("No strategy produced a move for seat {seat}")]
    NoMoveSelected { seat: PlayerId },
}

impl From<BoardError> for EngineError {
    fn from(error: BoardError) -> Self {
        EngineError::BoardError { error }
    }
}

/// Search performance statistics
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub cutoffs: usize,
    pub depth: u8,
    pub last_score: Option<i32>,
    pub last_search_duration: Option<Duration>,
}

pub struct Engine {
    board: Board,
    seat: PlayerId,
    selectors: Vec<Box<dyn MoveSelector>>,
    rng: StdRng,
    move_history: Vec<PlayerMove>,
}

impl Engine {
    /// Sets up a game for `seat` with local search and the greedy fallback.
    /// Absent or eliminated seats have a `None` position.
    pub fn init(
        seat: PlayerId,
        walls: u8,
        positions: &[Option<Cell>],
    ) -> Result<Self, EngineError> {
        Self::with_config(seat, walls, positions, EngineConfig::default())
    }

    /// Like [`Engine::init`], connecting to a remote solver first when one is
    /// configured. An unreachable solver is skipped.
    pub fn with_config(
        seat: PlayerId,
        walls: u8,
        positions: &[Option<Cell>],
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut selectors: Vec<Box<dyn MoveSelector>> = Vec::new();
        if let Some(address) = config.remote_address.as_deref() {
            if let Some(remote) = connect_remote(
                address,
                config.connect_timeout,
                config.reply_timeout,
                seat,
                walls,
                positions,
            ) {
                selectors.push(Box::new(remote));
            }
        }
        selectors.push(Box::new(SearchSelector::new(config.search_policy)));
        selectors.push(Box::new(GreedySelector));

        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_selectors(seat, walls, positions, selectors, rng)
    }

    /// Sets up a game with an explicit selector chain, asked in order.
    pub fn with_selectors(
        seat: PlayerId,
        walls: u8,
        positions: &[Option<Cell>],
        selectors: Vec<Box<dyn MoveSelector>>,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        let board = Board::new(crate::board::BOARD_DIM, walls, positions)?;
        if seat >= board.players().len() {
            return Err(EngineError::UnknownSeat { seat });
        }
        info!(
            "seat {} joins a {}-seat game with {} walls each",
            seat,
            positions.len(),
            walls
        );
        Ok(Self {
            board,
            seat,
            selectors,
            rng,
            move_history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    pub fn last_move(&self) -> Option<&PlayerMove> {
        self.move_history.last()
    }

    /// Names of the selectors still in the chain, in the order they are asked.
    pub fn selector_names(&self) -> Vec<&'static str> {
        self.selectors.iter().map(|selector| selector.name()).collect()
    }

    /// Records a confirmed move by any seat, this one included.
    pub fn on_move_applied(&mut self, player_move: &PlayerMove) -> Result<(), EngineError> {
        if let Err(error) = self.board.apply_move(player_move) {
            error!("confirmed move {} does not fit the board: {}", player_move, error);
            return Err(error.into());
        }
        self.move_history.push(*player_move);

        let board = &self.board;
        notify_selectors(&mut self.selectors, |selector| {
            selector.observe_move(board, player_move)
        })
    }

    pub fn on_player_invalidated(&mut self, seat: PlayerId) -> Result<(), EngineError> {
        self.board.invalidate(seat)?;
        info!("seat {} was invalidated", seat);
        notify_selectors(&mut self.selectors, |selector| {
            selector.observe_invalidation(seat)
        })
    }

    /// Chooses this seat's next move. Selectors that become unavailable are
    /// dropped for the rest of the game and the next one is asked.
    pub fn request_move(&mut self) -> Result<PlayerMove, EngineError> {
        if self.board.location(self.seat).is_none() {
            return Err(BoardError::EliminatedPlayer { player: self.seat }.into());
        }

        let mut index = 0;
        while index < self.selectors.len() {
            let selector = &mut self.selectors[index];
            match selector.select_move(&self.board, self.seat, &mut self.rng) {
                Ok(Some(chosen)) => {
                    info!("{} selector chose {}", selector.name(), chosen);
                    return Ok(chosen);
                }
                Ok(None) => index += 1,
                Err(SelectorError::Unavailable(reason)) => {
                    warn!("dropping {} selector: {}", selector.name(), reason);
                    self.selectors.remove(index);
                }
                Err(SelectorError::Fatal(error)) => {
                    error!("{} selector failed: {}", selector.name(), error);
                    return Err(error);
                }
            }
        }
        Err(EngineError::NoMoveSelected { seat: self.seat })
    }

    /// Cells reachable in one step from `cell`, ignoring pawns.
    pub fn neighbors_of(&self, cell: Cell) -> CellList {
        self.board.neighbors(cell)
    }

    /// Shortest path from `from` to `to`, both inclusive. Empty if there is none.
    pub fn shortest_path_between(&self, from: Cell, to: Cell) -> Path {
        path_between(&self.board, from, to)
    }

    pub fn search_stats(&self) -> Option<SearchStats> {
        self.selectors
            .iter()
            .find_map(|selector| selector.search_stats())
    }
}

fn notify_selectors<F>(
    selectors: &mut Vec<Box<dyn MoveSelector>>,
    mut notify: F,
) -> Result<(), EngineError>
where
    F: FnMut(&mut dyn MoveSelector) -> Result<(), SelectorError>,
{
    let mut index = 0;
    while index < selectors.len() {
        match notify(selectors[index].as_mut()) {
            Ok(()) => index += 1,
            Err(SelectorError::Unavailable(reason)) => {
                warn!("dropping {} selector: {}", selectors[index].name(), reason);
                selectors.remove(index);
            }
            Err(SelectorError::Fatal(error)) => return Err(error),
        }
    }
    Ok(())
}
