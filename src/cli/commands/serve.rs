//! Serve command - run a remote solver.

use quoridor::remote::{RemoteServer, DEFAULT_PORT};
use structopt::StructOpt;

use super::util::{create_config, exit_with_error, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct ServeArgs {
    #[structopt(long, default_value = "0.0.0.0")]
    pub address: String,
    #[structopt(long)]
    pub port: Option<u16>,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for ServeArgs {
    fn execute(self) {
        let config = create_config(&self.search);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let server = match RemoteServer::bind((self.address.as_str(), port), config) {
            Ok(server) => server,
            Err(err) => exit_with_error("Failed to bind", err),
        };
        if let Ok(address) = server.local_addr() {
            println!("Listening on {}", address);
        }
        if let Err(err) = server.serve() {
            exit_with_error("Server stopped", err);
        }
    }
}
