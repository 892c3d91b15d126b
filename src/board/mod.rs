pub mod cell;
pub mod direction;
pub mod error;
pub mod player;
pub mod wall;

mod display;

use log::{debug, warn};
use smallvec::SmallVec;

use crate::legality::validate_wall;
use crate::player_move::PlayerMove;

pub use cell::Cell;
pub use direction::{Direction, ALL_DIRECTIONS};
pub use error::BoardError;
pub use player::{Goal, Player, PlayerId};
pub use wall::{Orientation, Wall};

/// Standard board width and height.
pub const BOARD_DIM: usize = 9;
pub const MAX_BOARD_DIM: usize = 11;
pub const MAX_CELLS: usize = MAX_BOARD_DIM * MAX_BOARD_DIM;
pub const MAX_PLAYERS: usize = 4;

pub type PlayerList = SmallVec<[Player; MAX_PLAYERS]>;
pub type CellList = SmallVec<[Cell; 4]>;

/// Home cells on the standard board, indexed by seat.
pub const STARTING_CELLS: [Cell; MAX_PLAYERS] = [
    Cell::new(0, 4),
    Cell::new(8, 4),
    Cell::new(4, 0),
    Cell::new(4, 8),
];

/// Wall allowance per seat for a standard game.
pub fn walls_per_player(players: usize) -> u8 {
    match players {
        2 => 10,
        3 => 7,
        _ => 5,
    }
}

/// The authoritative game position: edge connectivity, seats and placed walls.
///
/// Connectivity is stored as one blocked-direction bitmask per cell in a fixed
/// array, so a clone is a flat copy plus the wall history. Border edges are
/// blocked at construction and wall edges are removed symmetrically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    blocked: [u8; MAX_CELLS],
    players: PlayerList,
    walls: Vec<Wall>,
}

impl Board {
    /// Builds an empty board. Seats with a `None` position are absent and
    /// never take a turn.
    pub fn new(
        dim: usize,
        walls_per_player: u8,
        positions: &[Option<Cell>],
    ) -> Result<Self, BoardError> {
        if !(2..=MAX_BOARD_DIM).contains(&dim) {
            return Err(BoardError::UnsupportedDimension { dim });
        }
        if !(2..=MAX_PLAYERS).contains(&positions.len()) {
            return Err(BoardError::UnsupportedPlayerCount {
                count: positions.len(),
            });
        }

        let mut players = PlayerList::new();
        for (id, position) in positions.iter().enumerate() {
            if let Some(cell) = position {
                if !cell.is_within(dim) {
                    return Err(BoardError::CellOutOfBounds { cell: *cell });
                }
            }
            players.push(Player::new(id, *position, walls_per_player));
        }

        let mut blocked = [0u8; MAX_CELLS];
        for row in 0..dim {
            for col in 0..dim {
                let cell = Cell::new(row, col);
                let mask = &mut blocked[cell.index(dim)];
                for direction in ALL_DIRECTIONS {
                    if cell.step(direction, dim).is_none() {
                        *mask |= direction.bit();
                    }
                }
            }
        }

        Ok(Self {
            dim,
            blocked,
            players,
            walls: Vec::new(),
        })
    }

    /// A standard 9x9 game with every seat on its home cell.
    pub fn starting_position(players: usize) -> Result<Self, BoardError> {
        if !(2..=MAX_PLAYERS).contains(&players) {
            return Err(BoardError::UnsupportedPlayerCount { count: players });
        }
        let positions: SmallVec<[Option<Cell>; MAX_PLAYERS]> =
            STARTING_CELLS[..players].iter().copied().map(Some).collect();
        Self::new(BOARD_DIM, walls_per_player(players), &positions)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, BoardError> {
        self.players
            .get(id)
            .ok_or(BoardError::UnknownPlayer { player: id })
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, BoardError> {
        self.players
            .get_mut(id)
            .ok_or(BoardError::UnknownPlayer { player: id })
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// The cell `player` stands on, if it is still in the game.
    pub fn location(&self, player: PlayerId) -> Option<Cell> {
        self.players
            .get(player)
            .and_then(|player| player.active_location())
    }

    #[inline]
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        self.blocked[cell.index(self.dim)] & direction.bit() == 0
    }

    /// The adjacent cell in `direction` if no wall or border is in the way.
    #[inline]
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if self.is_open(cell, direction) {
            cell.step(direction, self.dim)
        } else {
            None
        }
    }

    /// Reachable orthogonal neighbors, ignoring pawns.
    pub fn neighbors(&self, cell: Cell) -> CellList {
        if !cell.is_within(self.dim) {
            return CellList::new();
        }
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&direction| self.neighbor(cell, direction))
            .collect()
    }

    /// The active seat standing on `cell`, if any.
    pub fn occupant(&self, cell: Cell) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|player| player.active_location() == Some(cell))
            .map(|player| player.id)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    /// Applies a confirmed move in place. Walls are checked for legality
    /// before any edge is removed.
    pub fn apply_move(&mut self, player_move: &PlayerMove) -> Result<&mut Self, BoardError> {
        match *player_move {
            PlayerMove::Pawn { player, from, to } => self.move_pawn(player, from, to)?,
            PlayerMove::Wall(wall) => self.place_wall(wall)?,
        }
        Ok(self)
    }

    pub fn move_pawn(&mut self, player: PlayerId, from: Cell, to: Cell) -> Result<(), BoardError> {
        if !to.is_within(self.dim) {
            return Err(BoardError::CellOutOfBounds { cell: to });
        }
        let seat = self.player_mut(player)?;
        if seat.eliminated {
            return Err(BoardError::EliminatedPlayer { player });
        }
        if seat.location != Some(from) {
            warn!(
                "seat {} moved from {} but was recorded at {:?}",
                player, from, seat.location
            );
        }
        seat.location = Some(to);
        Ok(())
    }

    pub fn place_wall(&mut self, wall: Wall) -> Result<(), BoardError> {
        let owner = self.player(wall.owner)?;
        if owner.eliminated {
            return Err(BoardError::EliminatedPlayer { player: wall.owner });
        }
        if owner.walls_remaining == 0 {
            return Err(BoardError::NoWallsRemaining { player: wall.owner });
        }
        validate_wall(self, &wall).map_err(|reason| BoardError::IllegalWall { wall, reason })?;

        for (cell, direction) in wall.blocked_edges() {
            self.blocked[cell.index(self.dim)] |= direction.bit();
        }
        self.player_mut(wall.owner)?.walls_remaining -= 1;
        self.walls.push(wall);
        debug!("seat {} placed wall {}", wall.owner, wall);
        Ok(())
    }

    /// Removes `player` from the turn rotation. Its location and walls are kept.
    pub fn invalidate(&mut self, player: PlayerId) -> Result<(), BoardError> {
        self.player_mut(player)?.eliminated = true;
        Ok(())
    }

    /// The active seat standing on its own goal edge, if any.
    pub fn winner(&self) -> Option<PlayerId> {
        let dim = self.dim;
        self.active_players()
            .find(|player| {
                player
                    .location
                    .map_or(false, |cell| player.goal.is_reached(cell, dim))
            })
            .map(|player| player.id)
    }

    /// The next active seat after `current` in seating order, wrapping around.
    /// Returns `current` itself when it is the only active seat.
    pub fn next_active_seat(&self, current: PlayerId) -> Option<PlayerId> {
        let seats = self.players.len();
        (1..=seats)
            .map(|offset| (current + offset) % seats)
            .find(|&seat| self.players[seat].is_active())
    }

    /// Static evaluation from `player`'s point of view, see [`crate::evaluate::score`].
    pub fn evaluate(&self, player: PlayerId) -> Result<i32, BoardError> {
        crate::evaluate::score(self, player)
    }
}
