//! Wall legality: geometry, collisions with placed walls, and the rule that
//! every active seat keeps a route to its goal.

use thiserror::Error;

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, Cell, Direction, PlayerId, Wall};
use crate::pathfinder::{path_to_goal, Connectivity};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallError {
    #[error("wall is not a length-2 segment inside the board")]
    Geometry,
    #[error("wall crosses or overlaps {existing}")]
    Intersects { existing: Wall },
    #[error("wall cuts seat {player} off from its goal")]
    SealsPlayer { player: PlayerId },
}

/// The board as it would look with one extra wall. Nothing is written to the
/// board, so there is nothing to roll back.
pub struct WallOverlay<'a> {
    board: &'a Board,
    wall: Wall,
}

impl<'a> WallOverlay<'a> {
    pub fn new(board: &'a Board, wall: Wall) -> Self {
        Self { board, wall }
    }
}

impl Connectivity for WallOverlay<'_> {
    #[inline]
    fn dim(&self) -> usize {
        self.board.dim()
    }

    #[inline]
    fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        self.board.is_open(cell, direction) && !self.wall.blocks(cell, direction)
    }
}

/// Checks `wall` against `board`, stopping at the first failed rule.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn validate_wall(board: &Board, wall: &Wall) -> Result<(), WallError> {
    if !wall.is_well_formed(board.dim()) {
        return Err(WallError::Geometry);
    }

    if let Some(existing) = board.walls().iter().find(|placed| wall.intersects(placed)) {
        return Err(WallError::Intersects {
            existing: *existing,
        });
    }

    let overlay = WallOverlay::new(board, *wall);
    for player in board.active_players() {
        if path_to_goal(&overlay, board, player.id).is_none() {
            return Err(WallError::SealsPlayer { player: player.id });
        }
    }
    Ok(())
}

/// Boolean view of [`validate_wall`].
pub fn check_wall(board: &Board, wall: &Wall) -> bool {
    validate_wall(board, wall).is_ok()
}
