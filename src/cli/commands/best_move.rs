//! Best move command - determine the agent's move from a position.

use log::debug;
use quoridor::board::PlayerId;
use structopt::StructOpt;

use super::util::{create_config, exit_with_error, setup_engine, PositionArgs, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "0")]
    pub seat: PlayerId,
    #[structopt(flatten)]
    pub position: PositionArgs,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let config = create_config(&self.search);
        let mut engine = match setup_engine(&self.position, self.seat, config) {
            Ok(engine) => engine,
            Err(err) => exit_with_error("Invalid position", err),
        };

        if let Some(winner) = engine.board().winner() {
            eprintln!("Seat {} has already won.", winner);
            return;
        }

        match engine.request_move() {
            Ok(best_move) => {
                println!("{}", best_move);
                if let Some(stats) = engine.search_stats() {
                    debug!("{:?}", stats);
                }
            }
            Err(err) => exit_with_error("Failed to calculate best move", err),
        }
    }
}
