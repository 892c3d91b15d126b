//! Generic, game-agnostic alpha-beta searcher.

mod search;
mod traits;

pub use search::{alpha_beta_minimax, alpha_beta_search, SearchContext, SearchError};
pub use traits::{Evaluator, GameMove, GameState, MoveGenerator};

#[cfg(test)]
mod tests;
