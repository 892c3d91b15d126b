//! Search-free move selection: follow the shortest path, wall off a blocker.

use log::debug;
use rand::Rng;

use crate::board::{Board, BoardError, PlayerId, Wall};
use crate::legality::check_wall;
use crate::move_generator::{pawn_targets, WallCandidates};
use crate::pathfinder::{path_to_goal, shortest_path, Target};
use crate::player_move::PlayerMove;

/// Random proposals tried before falling back to enumeration order.
pub const RANDOM_WALL_ATTEMPTS: usize = 64;

/// A uniformly random wall position for `owner`. The start point is drawn
/// from the whole corner lattice, so the result may be malformed and must
/// go through the legality checker.
pub fn random_wall<R: Rng + ?Sized>(owner: PlayerId, dim: usize, rng: &mut R) -> Wall {
    let row = rng.gen_range(0..=dim);
    let col = rng.gen_range(0..=dim);
    if rng.gen::<bool>() {
        Wall::horizontal(owner, row, col)
    } else {
        Wall::vertical(owner, row, col)
    }
}

/// A legal wall for `owner`, trying random positions first.
pub fn legal_wall<R: Rng + ?Sized>(board: &Board, owner: PlayerId, rng: &mut R) -> Option<Wall> {
    let walls_remaining = board.player(owner).map_or(0, |seat| seat.walls_remaining);
    if walls_remaining == 0 {
        return None;
    }
    let dim = board.dim();
    (0..RANDOM_WALL_ATTEMPTS)
        .map(|_| random_wall(owner, dim, rng))
        .find(|wall| check_wall(board, wall))
        .or_else(|| WallCandidates::new(owner, dim).find(|wall| check_wall(board, wall)))
}

/// One step along `seat`'s shortest path to its goal.
///
/// When the next cell is taken by another pawn, places a legal wall if the
/// seat has any left, otherwise takes the pawn move (jumps included) that
/// leaves the shortest remaining route. Passes when nothing else is possible.
/// Returns `Ok(None)` for a seat that is out of the game.
pub fn greedy_path_move<R: Rng + ?Sized>(
    board: &Board,
    seat: PlayerId,
    rng: &mut R,
) -> Result<Option<PlayerMove>, BoardError> {
    let Some(from) = board.location(seat) else {
        return Ok(None);
    };
    let path = path_to_goal(board, board, seat).ok_or(BoardError::NoPathToGoal { player: seat })?;

    let next = match path.get(1) {
        Some(&next) => next,
        None => return Ok(Some(PlayerMove::pass(seat, from))),
    };
    if !board.is_occupied(next) {
        return Ok(Some(PlayerMove::pawn(seat, from, next)));
    }

    debug!("seat {} is blocked at {} by a pawn on {}", seat, from, next);
    if let Some(wall) = legal_wall(board, seat, rng) {
        return Ok(Some(PlayerMove::Wall(wall)));
    }

    let goal = board.player(seat)?.goal;
    let best_step = pawn_targets(board, from)
        .into_iter()
        .filter_map(|to| {
            shortest_path(board, to, Target::Goal(goal)).map(|route| (route.len(), to))
        })
        .min();
    Ok(Some(match best_step {
        Some((_, to)) => PlayerMove::pawn(seat, from, to),
        None => PlayerMove::pass(seat, from),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_random_wall_stays_on_the_lattice() {
        let mut rng = rng();
        for _ in 0..200 {
            let wall = random_wall(1, 9, &mut rng);
            assert_eq!(1, wall.owner);
            assert!(wall.start.row <= 9 && wall.start.col <= 9);
        }
    }

    #[test]
    fn test_steps_along_the_path() {
        let board = Board::starting_position(2).unwrap();
        let chosen = greedy_path_move(&board, 0, &mut rng()).unwrap();
        assert_eq!(
            Some(PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4))),
            chosen
        );
    }

    #[test]
    fn test_blocked_seat_places_a_legal_wall() {
        let board = Board::new(9, 10, &[Some(Cell::new(3, 4)), Some(Cell::new(4, 4))]).unwrap();
        let chosen = greedy_path_move(&board, 0, &mut rng()).unwrap().unwrap();
        match chosen {
            PlayerMove::Wall(wall) => {
                assert_eq!(0, wall.owner);
                assert!(check_wall(&board, &wall));
            }
            other => panic!("expected a wall, got {}", other),
        }
    }

    #[test]
    fn test_blocked_seat_without_walls_jumps() {
        let board = Board::new(9, 0, &[Some(Cell::new(3, 4)), Some(Cell::new(4, 4))]).unwrap();
        let chosen = greedy_path_move(&board, 0, &mut rng()).unwrap();
        assert_eq!(
            Some(PlayerMove::pawn(0, Cell::new(3, 4), Cell::new(5, 4))),
            chosen
        );
    }

    #[test]
    fn test_seat_on_goal_passes() {
        let board = Board::new(9, 0, &[Some(Cell::new(8, 4)), Some(Cell::new(4, 4))]).unwrap();
        let chosen = greedy_path_move(&board, 0, &mut rng()).unwrap();
        assert_eq!(Some(PlayerMove::pass(0, Cell::new(8, 4))), chosen);
    }

    #[test]
    fn test_eliminated_seat_gets_no_move() {
        let mut board = Board::starting_position(2).unwrap();
        board.invalidate(0).unwrap();
        assert_eq!(Ok(None), greedy_path_move(&board, 0, &mut rng()));
    }
}
