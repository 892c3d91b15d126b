//! Shortest routes over the connectivity graph.
//!
//! All edges cost 1, so breadth-first search and A* agree on path length.
//! A* with a goal-edge heuristic is the default because it expands fewer
//! cells; BFS is kept as the reference implementation.

pub mod priority_queue;

use std::collections::VecDeque;

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, Cell, Direction, Goal, PlayerId, ALL_DIRECTIONS, MAX_CELLS};
pub use priority_queue::PriorityQueue;

pub type Path = Vec<Cell>;

const NO_PARENT: usize = usize::MAX;

/// Read access to edge connectivity. Implemented by the board and by the
/// temporary overlay the legality checker builds around it.
pub trait Connectivity {
    fn dim(&self) -> usize;

    fn is_open(&self, cell: Cell, direction: Direction) -> bool;

    #[inline]
    fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if self.is_open(cell, direction) {
            cell.step(direction, self.dim())
        } else {
            None
        }
    }
}

impl Connectivity for Board {
    #[inline]
    fn dim(&self) -> usize {
        Board::dim(self)
    }

    #[inline]
    fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        Board::is_open(self, cell, direction)
    }
}

/// What a search is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Goal(Goal),
    Cell(Cell),
}

impl Target {
    #[inline]
    pub fn is_reached(self, cell: Cell, dim: usize) -> bool {
        match self {
            Target::Goal(goal) => goal.is_reached(cell, dim),
            Target::Cell(target) => cell == target,
        }
    }

    /// Admissible lower bound on the remaining steps.
    #[inline]
    pub fn estimate(self, cell: Cell, dim: usize) -> usize {
        match self {
            Target::Goal(goal) => goal.distance(cell, dim),
            Target::Cell(target) => cell.manhattan_distance(target),
        }
    }
}

fn reconstruct(parents: &[usize; MAX_CELLS], end: usize, dim: usize) -> Path {
    let mut path = vec![Cell::from_index(end, dim)];
    let mut current = end;
    while parents[current] != NO_PARENT {
        current = parents[current];
        path.push(Cell::from_index(current, dim));
    }
    path.reverse();
    path
}

/// A* from `start` to the first cell satisfying `target`, both ends inclusive.
/// Returns `None` when the target cannot be reached.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn shortest_path<C>(graph: &C, start: Cell, target: Target) -> Option<Path>
where
    C: Connectivity + ?Sized,
{
    let dim = graph.dim();
    if !start.is_within(dim) {
        return None;
    }

    let mut costs = [usize::MAX; MAX_CELLS];
    let mut parents = [NO_PARENT; MAX_CELLS];
    let mut closed = [false; MAX_CELLS];
    let mut frontier: PriorityQueue<usize, usize> = PriorityQueue::with_capacity(dim * 2);

    let start_index = start.index(dim);
    costs[start_index] = 0;
    frontier.push(start_index, target.estimate(start, dim));

    while let Some((index, _)) = frontier.pop() {
        let cell = Cell::from_index(index, dim);
        if target.is_reached(cell, dim) {
            return Some(reconstruct(&parents, index, dim));
        }
        closed[index] = true;

        let cost = costs[index] + 1;
        for direction in ALL_DIRECTIONS {
            let Some(next) = graph.neighbor(cell, direction) else {
                continue;
            };
            let next_index = next.index(dim);
            if closed[next_index] || cost >= costs[next_index] {
                continue;
            }
            costs[next_index] = cost;
            parents[next_index] = index;
            frontier.push(next_index, cost + target.estimate(next, dim));
        }
    }
    None
}

/// Plain breadth-first search with the same contract as [`shortest_path`].
pub fn breadth_first_path<C>(graph: &C, start: Cell, target: Target) -> Option<Path>
where
    C: Connectivity + ?Sized,
{
    let dim = graph.dim();
    if !start.is_within(dim) {
        return None;
    }

    let mut parents = [NO_PARENT; MAX_CELLS];
    let mut visited = [false; MAX_CELLS];
    let mut queue = VecDeque::with_capacity(dim * dim);

    let start_index = start.index(dim);
    visited[start_index] = true;
    queue.push_back(start_index);

    while let Some(index) = queue.pop_front() {
        let cell = Cell::from_index(index, dim);
        if target.is_reached(cell, dim) {
            return Some(reconstruct(&parents, index, dim));
        }
        for direction in ALL_DIRECTIONS {
            if let Some(next) = graph.neighbor(cell, direction) {
                let next_index = next.index(dim);
                if !visited[next_index] {
                    visited[next_index] = true;
                    parents[next_index] = index;
                    queue.push_back(next_index);
                }
            }
        }
    }
    None
}

/// Point-to-point query. An unreachable or off-board pair yields an empty path.
pub fn path_between<C>(graph: &C, from: Cell, to: Cell) -> Path
where
    C: Connectivity + ?Sized,
{
    if !to.is_within(graph.dim()) {
        return Path::new();
    }
    shortest_path(graph, from, Target::Cell(to)).unwrap_or_default()
}

/// Route for an active seat from its cell to its goal edge.
pub fn path_to_goal<C>(graph: &C, board: &Board, player: PlayerId) -> Option<Path>
where
    C: Connectivity + ?Sized,
{
    let seat = board.players().get(player)?;
    let location = seat.active_location()?;
    shortest_path(graph, location, Target::Goal(seat.goal))
}

/// Steps an active seat needs to reach its goal on the board as it stands.
pub fn distance_to_goal(board: &Board, player: PlayerId) -> Option<usize> {
    path_to_goal(board, board, player).map(|path| path.len() - 1)
}
