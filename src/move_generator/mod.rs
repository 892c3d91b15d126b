//! Pawn and wall move enumeration.

pub mod generator;
mod wall_candidates;

pub use generator::{generate_moves, generate_pawn_moves, pawn_targets, MoveList, Moves};
pub use wall_candidates::WallCandidates;
