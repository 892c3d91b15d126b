//! Core traits for generic alpha-beta search.

use std::fmt::Debug;

/// A turn-based game position with any number of seats.
///
/// The searcher maximizes for one seat and treats every other seat as a
/// minimizing opponent, taking turns in the order `next_turn` reports.
pub trait GameState: Clone {
    type Player: Copy + Eq + Debug;

    /// The seat that has won, if the game is over.
    fn winner(&self) -> Option<Self::Player>;

    /// The seat that moves after `current`, or `None` if nobody can move.
    fn next_turn(&self, current: Self::Player) -> Option<Self::Player>;
}

/// An action that can be applied to a game state.
pub trait GameMove: Clone + PartialEq + Debug {
    type State: GameState;
    type Error: Debug;

    /// Applies this move to the given state.
    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;
}

/// Produces the moves available to a seat, lazily.
pub trait MoveGenerator<S: GameState> {
    type Move: GameMove<State = S>;
    type Moves<'a>: Iterator<Item = Self::Move>
    where
        Self: 'a,
        S: 'a;

    fn generate_moves<'a>(&'a self, state: &'a S, player: S::Player) -> Self::Moves<'a>;
}

/// Scores positions from the maximizing seat's point of view.
pub trait Evaluator<S: GameState> {
    type Error: Debug;

    /// Static evaluation of a non-terminal position. Higher is better for `maximizing`.
    fn evaluate(&self, state: &S, maximizing: S::Player) -> Result<i32, Self::Error>;

    /// Score of a finished game. Must dominate every value `evaluate` can return.
    fn terminal_score(&self, winner: S::Player, maximizing: S::Player) -> i32;
}
