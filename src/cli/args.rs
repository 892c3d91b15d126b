//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, path::PathArgs, serve::ServeArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "quoridor",
    about = "A Quoridor agent for 2 to 4 players, searching with alpha-beta pruning"
)]
pub enum Quoridor {
    #[structopt(
        name = "watch",
        about = "Watch the agent play against itself from the standard setup for `--players` seats (default: 2). Moves given with `--move` are replayed first."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "best-move",
        about = "Print the move the agent would make for `--seat` (default: 0) after replaying the moves given with `--move`. The search depth adapts to the seats left in the game unless `--depth` is given."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "path",
        about = "Print the shortest path between two cells, given as `row,col`, after replaying the moves given with `--move`. Pawns do not block paths."
    )]
    Path(PathArgs),
    #[structopt(
        name = "serve",
        about = "Run a remote solver on `--port` (default: 51894) for agents started with `--remote`."
    )]
    Serve(ServeArgs),
}

impl crate::cli::commands::Command for Quoridor {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Watch(cmd),
            BestMove(cmd),
            Path(cmd),
            Serve(cmd),
        }
    }
}
