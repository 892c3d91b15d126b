use quoridor::alpha_beta_searcher::SearchContext;
use quoridor::board::{Board, Cell, Wall};
use quoridor::legality::check_wall;
use quoridor::move_generator::{generate_moves, WallCandidates};
use quoridor::pathfinder::{breadth_first_path, shortest_path, Target};
use quoridor::player_move::PlayerMove;
use quoridor::quoridor_search::{search_best_move, SearchPolicy};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let opening = Board::starting_position(2).unwrap();
    let midgame = midgame_position();
    let crowded = Board::starting_position(4).unwrap();

    c.bench_function("generate all moves, opening", |b| {
        b.iter(|| generate_moves(black_box(&opening), 0, true).count())
    });
    c.bench_function("check every wall, midgame", |b| {
        b.iter(|| {
            WallCandidates::new(0, midgame.dim())
                .filter(|wall| check_wall(black_box(&midgame), wall))
                .count()
        })
    });
    c.bench_function("a* to goal, midgame", |b| {
        let goal = midgame.players()[0].goal;
        b.iter(|| shortest_path(black_box(&midgame), Cell::new(0, 4), Target::Goal(goal)))
    });
    c.bench_function("bfs to goal, midgame", |b| {
        let goal = midgame.players()[0].goal;
        b.iter(|| breadth_first_path(black_box(&midgame), Cell::new(0, 4), Target::Goal(goal)))
    });
    c.bench_function("search depth 2, opening", |b| {
        b.iter(|| best_move(black_box(&opening), 0, SearchPolicy::for_players(2)))
    });
    c.bench_function("search depth 2, midgame", |b| {
        b.iter(|| best_move(black_box(&midgame), 1, SearchPolicy::for_players(2)))
    });
    c.bench_function("search four seats", |b| {
        b.iter(|| best_move(black_box(&crowded), 0, SearchPolicy::for_players(4)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn best_move(board: &Board, player: usize, policy: SearchPolicy) -> Option<(PlayerMove, i32)> {
    let mut context = SearchContext::new(policy.depth);
    search_best_move(&mut context, board, player, policy).unwrap()
}

fn midgame_position() -> Board {
    let mut board = Board::starting_position(2).unwrap();
    let moves = [
        PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)),
        PlayerMove::pawn(1, Cell::new(8, 4), Cell::new(7, 4)),
        PlayerMove::Wall(Wall::horizontal(0, 7, 3)),
        PlayerMove::Wall(Wall::horizontal(1, 2, 4)),
        PlayerMove::Wall(Wall::vertical(0, 5, 5)),
        PlayerMove::Wall(Wall::vertical(1, 1, 3)),
    ];
    for player_move in &moves {
        board.apply_move(player_move).unwrap();
    }
    board
}
