//! Domain-agnostic tests for the alpha-beta search algorithm using Nim.
//!
//! Test coverage:
//! - Basic search functionality (winning moves, losing positions, game completion)
//! - Error handling (zero depth, no moves, illegal generated moves, evaluation failures)
//! - More than two seats, with every non-maximizing seat minimizing
//! - Pruning never changes the result compared to plain minimax

use super::*;

/// Nim with any number of seats: take 1-3 objects, whoever takes the last one wins.
#[derive(Clone, Debug)]
struct NimState {
    pile: u8,
    seats: u8,
    to_move: u8,
    last_mover: Option<u8>,
}

impl NimState {
    fn new(pile: u8) -> Self {
        Self::with_seats(pile, 2)
    }

    fn with_seats(pile: u8, seats: u8) -> Self {
        Self {
            pile,
            seats,
            to_move: 0,
            last_mover: None,
        }
    }
}

impl GameState for NimState {
    type Player = u8;

    fn winner(&self) -> Option<u8> {
        if self.pile == 0 {
            self.last_mover
        } else {
            None
        }
    }

    fn next_turn(&self, current: u8) -> Option<u8> {
        Some((current + 1) % self.seats)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct NimMove {
    take: u8,
}

impl GameMove for NimMove {
    type State = NimState;
    type Error = &'static str;

    fn apply(&self, state: &mut NimState) -> Result<(), Self::Error> {
        if self.take > state.pile || self.take == 0 || self.take > 3 {
            return Err("Invalid move");
        }
        state.pile -= self.take;
        state.last_mover = Some(state.to_move);
        state.to_move = (state.to_move + 1) % state.seats;
        Ok(())
    }
}

struct NimMoveGenerator;

impl MoveGenerator<NimState> for NimMoveGenerator {
    type Move = NimMove;
    type Moves<'a> = std::vec::IntoIter<NimMove>;

    fn generate_moves<'a>(&'a self, state: &'a NimState, _player: u8) -> Self::Moves<'a> {
        (1..=std::cmp::min(3, state.pile))
            .map(|take| NimMove { take })
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// Always offers a move that takes too many objects.
struct GreedyNimMoveGenerator;

impl MoveGenerator<NimState> for GreedyNimMoveGenerator {
    type Move = NimMove;
    type Moves<'a> = std::iter::Once<NimMove>;

    fn generate_moves<'a>(&'a self, _state: &'a NimState, _player: u8) -> Self::Moves<'a> {
        std::iter::once(NimMove { take: 4 })
    }
}

struct NimEvaluator;

impl Evaluator<NimState> for NimEvaluator {
    type Error = &'static str;

    fn evaluate(&self, state: &NimState, maximizing: u8) -> Result<i32, Self::Error> {
        // pile % 4 == 0 is a losing position for the player to move
        let mover_is_losing = state.pile % 4 == 0;
        let maximizer_to_move = state.to_move == maximizing;
        Ok(if mover_is_losing == maximizer_to_move {
            -100
        } else {
            100
        })
    }

    fn terminal_score(&self, winner: u8, maximizing: u8) -> i32 {
        if winner == maximizing {
            1000
        } else {
            -1000
        }
    }
}

/// Arbitrary but deterministic leaf values, so that pruning has something to cut.
struct ScatteredEvaluator;

impl Evaluator<NimState> for ScatteredEvaluator {
    type Error = &'static str;

    fn evaluate(&self, state: &NimState, maximizing: u8) -> Result<i32, Self::Error> {
        let seed = state.pile as i32 * 7 + state.to_move as i32 * 3 + maximizing as i32 * 5;
        Ok(seed % 11 - 5)
    }

    fn terminal_score(&self, winner: u8, maximizing: u8) -> i32 {
        NimEvaluator.terminal_score(winner, maximizing)
    }
}

struct FailingEvaluator;

impl Evaluator<NimState> for FailingEvaluator {
    type Error = &'static str;

    fn evaluate(&self, _state: &NimState, _maximizing: u8) -> Result<i32, Self::Error> {
        Err("broken")
    }

    fn terminal_score(&self, winner: u8, maximizing: u8) -> i32 {
        NimEvaluator.terminal_score(winner, maximizing)
    }
}

/// Exhaustive minimax without pruning, used as the reference.
fn plain_minimax<E: Evaluator<NimState>>(
    state: &NimState,
    evaluator: &E,
    depth: u8,
    maximizing: u8,
    current: u8,
) -> i32 {
    if let Some(winner) = state.winner() {
        return evaluator.terminal_score(winner, maximizing);
    }
    if depth == 0 {
        return evaluator.evaluate(state, maximizing).unwrap();
    }
    let next = state.next_turn(current).unwrap();
    let scores = NimMoveGenerator
        .generate_moves(state, current)
        .map(|candidate| {
            let mut child = state.clone();
            candidate.apply(&mut child).unwrap();
            plain_minimax(&child, evaluator, depth - 1, maximizing, next)
        });
    if current == maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

fn plain_minimax_root<E: Evaluator<NimState>>(
    state: &NimState,
    evaluator: &E,
    depth: u8,
) -> (NimMove, i32) {
    let maximizing = state.to_move;
    let next = state.next_turn(maximizing).unwrap();
    let mut best: Option<(NimMove, i32)> = None;
    for candidate in NimMoveGenerator.generate_moves(state, maximizing) {
        let mut child = state.clone();
        candidate.apply(&mut child).unwrap();
        let score = plain_minimax(&child, evaluator, depth - 1, maximizing, next);
        if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
            best = Some((candidate, score));
        }
    }
    best.unwrap()
}

fn search(state: &NimState, depth: u8) -> Result<(NimMove, i32), SearchError> {
    let mut context = SearchContext::<NimMove>::new(depth);
    alpha_beta_search(
        &mut context,
        state,
        &NimMoveGenerator,
        &NimEvaluator,
        state.to_move,
    )
}

#[test]
fn test_nim_losing_position() {
    let (best_move, score) = search(&NimState::new(4), 10).unwrap();
    assert!(
        best_move.take >= 1 && best_move.take <= 3,
        "Move should be valid (1-3)"
    );
    assert_eq!(-1000, score);
}

#[test]
fn test_nim_leaves_a_multiple_of_four() {
    for pile in (1..=15).filter(|pile| pile % 4 != 0) {
        let (best_move, score) = search(&NimState::new(pile), 20).unwrap();
        assert_eq!(
            pile % 4,
            best_move.take,
            "from pile {} the only winning take is {}",
            pile,
            pile % 4
        );
        assert_eq!(1000, score, "pile {}", pile);
    }
}

#[test]
fn test_nim_game_to_completion() {
    let mut state = NimState::new(5);
    let mut move_count = 0;

    while state.pile > 0 {
        let (best_move, _) = search(&state, 12).unwrap();
        best_move.apply(&mut state).unwrap();
        move_count += 1;
        assert!(move_count < 20, "Game should not exceed 20 moves");
    }

    assert_eq!(Some(0), state.winner(), "Player one should win from pile of 5");
}

#[test]
fn test_search_returns_error_for_zero_depth() {
    let result = search(&NimState::new(5), 0);
    assert!(matches!(result, Err(SearchError::DepthTooLow)));
}

#[test]
fn test_search_returns_error_for_no_moves() {
    let result = search(&NimState::new(0), 5);
    assert!(matches!(result, Err(SearchError::NoAvailableMoves)));
}

#[test]
fn test_illegal_generated_move_is_reported() {
    let state = NimState::new(2);
    let mut context = SearchContext::<NimMove>::new(3);
    let result = alpha_beta_search(&mut context, &state, &GreedyNimMoveGenerator, &NimEvaluator, 0);
    assert!(matches!(result, Err(SearchError::InvalidMove(_))));
}

#[test]
fn test_evaluation_failure_is_reported() {
    let state = NimState::new(9);
    let mut context = SearchContext::<NimMove>::new(2);
    let result = alpha_beta_search(&mut context, &state, &NimMoveGenerator, &FailingEvaluator, 0);
    assert_eq!(Err(SearchError::Evaluation("\"broken\"".to_string())), result);
}

#[test]
fn test_depth_one_uses_static_evaluation() {
    // from 6, taking 2 leaves the opponent on a multiple of 4
    let (best_move, score) = search(&NimState::new(6), 1).unwrap();
    assert_eq!(2, best_move.take);
    assert_eq!(100, score);
}

#[test]
fn test_three_seats_every_opponent_minimizes() {
    let state = NimState::with_seats(5, 3);
    for depth in 1..=6 {
        let mut context = SearchContext::<NimMove>::new(depth);
        let result =
            alpha_beta_search(&mut context, &state, &NimMoveGenerator, &ScatteredEvaluator, 0)
                .unwrap();
        assert_eq!(plain_minimax_root(&state, &ScatteredEvaluator, depth), result);
    }
}

#[test]
fn test_pruning_matches_plain_minimax() {
    for seats in 2..=4 {
        for pile in 1..=12 {
            for depth in 1..=5 {
                let state = NimState::with_seats(pile, seats);
                let mut context = SearchContext::<NimMove>::new(depth);
                let pruned =
                    alpha_beta_search(&mut context, &state, &NimMoveGenerator, &ScatteredEvaluator, 0)
                        .unwrap();
                let exhaustive = plain_minimax_root(&state, &ScatteredEvaluator, depth);
                assert_eq!(
                    exhaustive, pruned,
                    "seats {} pile {} depth {}",
                    seats, pile, depth
                );
            }
        }
    }
}

#[test]
fn test_search_records_stats() {
    let state = NimState::new(12);
    let mut context = SearchContext::<NimMove>::new(6);
    let (best_move, score) =
        alpha_beta_search(&mut context, &state, &NimMoveGenerator, &ScatteredEvaluator, 0).unwrap();

    assert!(context.searched_position_count() > 0);
    assert!(context.cutoff_count() > 0);
    assert_eq!(Some(score), context.last_score());
    assert!(context.last_search_duration().is_some());
    assert_eq!(Some(&best_move), context.best_move());

    context.reset_stats();
    assert_eq!(0, context.searched_position_count());
    assert_eq!(None, context.best_move());
}
