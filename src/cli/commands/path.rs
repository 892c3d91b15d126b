//! Path command - shortest path between two cells.

use quoridor::board::Cell;
use quoridor::engine::EngineConfig;
use structopt::StructOpt;

use super::util::{exit_with_error, setup_engine, PositionArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PathArgs {
    #[structopt(help = "Start cell as `row,col`")]
    pub from: Cell,
    #[structopt(help = "End cell as `row,col`")]
    pub to: Cell,
    #[structopt(long, help = "Also print the open neighbors of the start cell")]
    pub neighbors: bool,
    #[structopt(flatten)]
    pub position: PositionArgs,
}

impl Command for PathArgs {
    fn execute(self) {
        let engine = match setup_engine(&self.position, 0, EngineConfig::default()) {
            Ok(engine) => engine,
            Err(err) => exit_with_error("Invalid position", err),
        };

        println!("{}", engine.board());
        if self.neighbors {
            let neighbors: Vec<String> = engine
                .neighbors_of(self.from)
                .iter()
                .map(Cell::to_string)
                .collect();
            println!("neighbors of {}: {}", self.from, neighbors.join(" "));
        }

        let path = engine.shortest_path_between(self.from, self.to);
        if path.is_empty() {
            println!("no path from {} to {}", self.from, self.to);
            return;
        }
        let steps: Vec<String> = path.iter().map(Cell::to_string).collect();
        println!("{} steps: {}", path.len() - 1, steps.join(" "));
    }
}
