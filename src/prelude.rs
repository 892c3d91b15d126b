//! Common types re-exported for convenience.

pub use crate::board::{Board, Cell, Direction, Goal, PlayerId, Wall};
pub use crate::engine::{Engine, EngineConfig, EngineError};
pub use crate::player_move::PlayerMove;
pub use crate::quoridor_search::SearchPolicy;
