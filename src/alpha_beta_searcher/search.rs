//! Alpha-beta search algorithm implementation.
//!
//! Depth-limited minimax over cloned states. One seat maximizes; every
//! other seat minimizes on its own turn, in the order the state reports.
//! The window [alpha, beta] holds the scores that can still change the
//! result; once it closes the remaining siblings are skipped. Pruning never
//! changes the chosen move or its score, only the number of positions visited.

use std::cmp::{max, min};
use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{Evaluator, GameMove, GameState, MoveGenerator};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("generated move could not be applied: {0}")]
    InvalidMove(String),
    #[error("position could not be evaluated: {0}")]
    Evaluation(String),
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    cutoff_count: usize,
    last_score: Option<i32>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        self.position_count = 0;
        self.cutoff_count = 0;
    }

    fn record_result(&mut self, score: i32, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Search depth plus the statistics and result of the last search.
pub struct SearchContext<M> {
    depth: u8,
    stats: SearchStats,
    best_move: Option<M>,
}

impl<M: Clone> SearchContext<M> {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            stats: SearchStats::default(),
            best_move: None,
        }
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.best_move = None;
    }

    pub fn search_depth(&self) -> u8 {
        self.depth
    }

    pub fn set_search_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoff_count
    }

    pub fn last_score(&self) -> Option<i32> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub fn best_move(&self) -> Option<&M> {
        self.best_move.as_ref()
    }
}

/// Picks the best move for `maximizing` at the context's depth.
///
/// Moves are tried in generation order and the first one reaching the best
/// score wins ties.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta_search<S, G, E>(
    context: &mut SearchContext<G::Move>,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    maximizing: S::Player,
) -> Result<(G::Move, i32), SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    let depth = context.search_depth();
    debug!("alpha-beta search depth: {}", depth);
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.reset_stats();
    let start = Instant::now();

    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best: Option<(G::Move, i32)> = None;

    for candidate in move_generator.generate_moves(state, maximizing) {
        let child = apply_to_clone(state, &candidate)?;
        let score = match child.next_turn(maximizing) {
            Some(next) => alpha_beta_minimax(
                context,
                &child,
                move_generator,
                evaluator,
                depth - 1,
                maximizing,
                alpha,
                beta,
                next,
            )?,
            None => leaf_score(context, &child, evaluator, maximizing)?,
        };

        if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
            best = Some((candidate, score));
        }
        alpha = max(alpha, score);
    }

    let (best_move, best_score) = best.ok_or(SearchError::NoAvailableMoves)?;
    let duration = start.elapsed();
    context.stats.record_result(best_score, duration);
    context.best_move = Some(best_move.clone());
    debug!(
        "searched {} positions ({} cutoffs) in {:?}, best score {}",
        context.searched_position_count(),
        context.cutoff_count(),
        duration,
        best_score
    );

    Ok((best_move, best_score))
}

/// Minimax value of `state` with `current` to move and `depth` plies left.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta_minimax<S, G, E>(
    context: &mut SearchContext<G::Move>,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    depth: u8,
    maximizing: S::Player,
    mut alpha: i32,
    mut beta: i32,
    current: S::Player,
) -> Result<i32, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    if depth == 0 || state.winner().is_some() {
        return leaf_score(context, state, evaluator, maximizing);
    }
    let Some(next) = state.next_turn(current) else {
        return leaf_score(context, state, evaluator, maximizing);
    };
    context.stats.position_count += 1;

    let is_maximizing = current == maximizing;
    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };
    let mut searched_any = false;

    for candidate in move_generator.generate_moves(state, current) {
        searched_any = true;
        let child = apply_to_clone(state, &candidate)?;
        let score = alpha_beta_minimax(
            context,
            &child,
            move_generator,
            evaluator,
            depth - 1,
            maximizing,
            alpha,
            beta,
            next,
        )?;

        if is_maximizing {
            best_score = max(best_score, score);
            alpha = max(alpha, best_score);
        } else {
            best_score = min(best_score, score);
            beta = min(beta, best_score);
        }
        if beta <= alpha {
            context.stats.cutoff_count += 1;
            break;
        }
    }

    if !searched_any {
        return leaf_score(context, state, evaluator, maximizing);
    }
    Ok(best_score)
}

fn apply_to_clone<M: GameMove>(state: &M::State, candidate: &M) -> Result<M::State, SearchError> {
    let mut child = state.clone();
    candidate
        .apply(&mut child)
        .map_err(|error| SearchError::InvalidMove(format!("{:?}: {:?}", candidate, error)))?;
    Ok(child)
}

fn leaf_score<S, M, E>(
    context: &mut SearchContext<M>,
    state: &S,
    evaluator: &E,
    maximizing: S::Player,
) -> Result<i32, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    context.stats.position_count += 1;
    if let Some(winner) = state.winner() {
        return Ok(evaluator.terminal_score(winner, maximizing));
    }
    evaluator
        .evaluate(state, maximizing)
        .map_err(|error| SearchError::Evaluation(format!("{:?}", error)))
}
