//! Shared utilities for CLI commands.

use std::time::Duration;

use quoridor::board::{walls_per_player, BoardError, PlayerId, MAX_PLAYERS, STARTING_CELLS};
use quoridor::engine::{Engine, EngineConfig, EngineError};
use quoridor::player_move::PlayerMove;
use quoridor::quoridor_search::SearchPolicy;
use structopt::StructOpt;

/// A game position: the standard setup plus replayed history.
#[derive(StructOpt)]
pub struct PositionArgs {
    #[structopt(short, long, default_value = "2", help = "Number of seats (2-4)")]
    pub players: usize,
    #[structopt(
        long,
        help = "Walls per seat (default: 10 for 2 seats, 7 for 3, 5 for 4)"
    )]
    pub walls: Option<u8>,
    #[structopt(
        short = "m",
        long = "move",
        number_of_values = 1,
        help = "Move to replay, as `m <seat> <r1>,<c1> <r2>,<c2>` or `w <seat> <r1>,<c1> <r2>,<c2>` (repeatable)"
    )]
    pub moves: Vec<PlayerMove>,
    #[structopt(
        long = "invalidate",
        number_of_values = 1,
        help = "Seat to eliminate before replaying moves (repeatable)"
    )]
    pub invalidated: Vec<PlayerId>,
}

#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, help = "Fixed search depth (default: adapts to the seats left)")]
    pub depth: Option<u8>,
    #[structopt(long, help = "Let opponents place walls at a fixed `--depth`")]
    pub opponent_walls: bool,
    #[structopt(long, help = "Seed for random wall proposals")]
    pub seed: Option<u64>,
    #[structopt(long, help = "Remote solver to delegate to, as `host` or `host:port`")]
    pub remote: Option<String>,
    #[structopt(
        long = "connect-timeout",
        default_value = "9500",
        help = "Remote solver connect timeout in milliseconds"
    )]
    pub connect_timeout_ms: u64,
    #[structopt(
        long = "reply-timeout",
        help = "Drop the remote solver when a reply takes longer than this many milliseconds"
    )]
    pub reply_timeout_ms: Option<u64>,
}

pub(crate) fn create_config(search: &SearchArgs) -> EngineConfig {
    EngineConfig {
        search_policy: search.depth.map(|depth| SearchPolicy {
            depth,
            opponent_walls: search.opponent_walls,
        }),
        remote_address: search.remote.clone(),
        connect_timeout: Duration::from_millis(search.connect_timeout_ms),
        reply_timeout: search.reply_timeout_ms.map(Duration::from_millis),
        seed: search.seed,
    }
}

/// An engine for `seat` with `position` replayed into it.
pub(crate) fn setup_engine(
    position: &PositionArgs,
    seat: PlayerId,
    config: EngineConfig,
) -> Result<Engine, EngineError> {
    if position.players > MAX_PLAYERS {
        return Err(BoardError::UnsupportedPlayerCount {
            count: position.players,
        }
        .into());
    }
    let positions: Vec<_> = STARTING_CELLS
        .iter()
        .take(position.players)
        .copied()
        .map(Some)
        .collect();
    let walls = position
        .walls
        .unwrap_or_else(|| walls_per_player(position.players));

    let mut engine = Engine::with_config(seat, walls, &positions, config)?;
    for &invalidated in &position.invalidated {
        engine.on_player_invalidated(invalidated)?;
    }
    for player_move in &position.moves {
        engine.on_move_applied(player_move)?;
    }
    Ok(engine)
}

/// Prints `error` and exits with a failure status.
pub(crate) fn exit_with_error(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}
