//! Watch command - watch the agent play against itself.

use std::thread;
use std::time::Duration;

use quoridor::board::BoardError;
use quoridor::engine::Engine;
use structopt::StructOpt;

use super::util::{create_config, exit_with_error, setup_engine, PositionArgs, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub position: PositionArgs,
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(
        long = "delay",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(
        long = "max-turns",
        default_value = "300",
        help = "Stop after this many moves"
    )]
    pub max_turns: usize,
}

impl Command for WatchArgs {
    fn execute(self) {
        if self.position.players < 2 {
            let count = self.position.players;
            exit_with_error("Invalid position", BoardError::UnsupportedPlayerCount { count });
        }
        let mut engines: Vec<Engine> = Vec::new();
        for seat in 0..self.position.players {
            let config = create_config(&self.search);
            match setup_engine(&self.position, seat, config) {
                Ok(engine) => engines.push(engine),
                Err(err) => exit_with_error("Invalid position", err),
            }
        }

        let first = match self.position.moves.last() {
            Some(last) => last.player(),
            None => self.position.players - 1,
        };
        let mut current = engines[0].board().next_active_seat(first);
        println!("{}", engines[0].board());

        for turn in 1..=self.max_turns {
            let Some(seat) = current else {
                println!("No seats left in the game.");
                return;
            };
            let chosen = match engines[seat].request_move() {
                Ok(chosen) => chosen,
                Err(err) => exit_with_error("Failed to choose a move", err),
            };
            for engine in engines.iter_mut() {
                if let Err(err) = engine.on_move_applied(&chosen) {
                    exit_with_error("Move rejected", err);
                }
            }

            let board = engines[0].board();
            println!("turn {}: {}\n{}", turn, chosen, board);
            if let Some(winner) = board.winner() {
                println!("Seat {} wins.", winner);
                return;
            }
            current = board.next_active_seat(seat);
            thread::sleep(Duration::from_millis(self.delay_ms));
        }
        println!("No winner after {} moves.", self.max_turns);
    }
}
