pub mod alpha_beta_searcher;
pub mod board;
pub mod engine;
pub mod evaluate;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod legality;
pub mod move_generator;
pub mod pathfinder;
pub mod player_move;
pub mod prelude;
pub mod quoridor_search;
pub mod remote;
