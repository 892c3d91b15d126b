mod cli;

use cli::commands::Command;
use cli::Quoridor;
use structopt::StructOpt;

fn main() {
    #[cfg(feature = "instrumentation")]
    quoridor::instrumentation::init_tracing();
    #[cfg(not(feature = "instrumentation"))]
    env_logger::init();

    Quoridor::from_args().execute();

    #[cfg(feature = "instrumentation")]
    quoridor::instrumentation::print_timing_statistics();
}
