//! Blocking client for a remote solver.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::board::{Cell, PlayerId};
use crate::player_move::PlayerMove;

use super::protocol::{
    parse_cells, parse_move_reply, ProtocolError, RemoteCommand, ACK, DEFAULT_PORT,
};

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("could not resolve solver address `{address}`")]
    Unresolved { address: String },
    #[error("solver I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("solver closed the connection")]
    Disconnected,
    #[error("expected ack from solver, received `{reply}`")]
    BadAck { reply: String },
    #[error("malformed reply `{reply}` from solver: {error}")]
    Malformed { reply: String, error: ProtocolError },
}

/// An open, initialised session with a solver. Every call is one blocking
/// round trip, bounded by the reply timeout when one is set.
pub struct RemoteSolver {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: SocketAddr,
}

fn resolve(address: &str) -> Result<Vec<SocketAddr>, RemoteError> {
    let unresolved = || RemoteError::Unresolved {
        address: address.to_string(),
    };
    let addresses: Vec<SocketAddr> = match address.to_socket_addrs() {
        Ok(addresses) => addresses.collect(),
        Err(_) => (address, DEFAULT_PORT)
            .to_socket_addrs()
            .map_err(|_| unresolved())?
            .collect(),
    };
    if addresses.is_empty() {
        return Err(unresolved());
    }
    Ok(addresses)
}

impl RemoteSolver {
    /// Connects to `address` (`host` or `host:port`, default port
    /// [`DEFAULT_PORT`]) and sends the game setup. `connect_timeout` only
    /// bounds establishing the connection; `reply_timeout` bounds every read
    /// and write after that, and `None` waits as long as the solver needs.
    pub fn connect(
        address: &str,
        connect_timeout: Duration,
        reply_timeout: Option<Duration>,
        seat: PlayerId,
        walls: u8,
        positions: &[Option<Cell>],
    ) -> Result<Self, RemoteError> {
        let mut last_error = None;
        for peer in resolve(address)? {
            match TcpStream::connect_timeout(&peer, connect_timeout) {
                Ok(stream) => {
                    let mut solver = Self::from_stream(stream, reply_timeout)?;
                    solver.round_trip(&RemoteCommand::Init {
                        seat,
                        walls,
                        positions: positions.to_vec(),
                    })?;
                    debug!("connected to solver at {}", solver.peer);
                    return Ok(solver);
                }
                Err(error) => last_error = Some(error),
            }
        }
        Err(last_error.map_or(RemoteError::Disconnected, RemoteError::Io))
    }

    fn from_stream(
        stream: TcpStream,
        reply_timeout: Option<Duration>,
    ) -> Result<Self, RemoteError> {
        stream.set_read_timeout(reply_timeout)?;
        stream.set_write_timeout(reply_timeout)?;
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr()?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
            peer,
        })
    }

    pub fn send_move(&mut self, player_move: &PlayerMove) -> Result<(), RemoteError> {
        self.round_trip(&RemoteCommand::for_move(player_move))
            .map(|_| ())
    }

    pub fn send_invalidate(&mut self, seat: PlayerId) -> Result<(), RemoteError> {
        self.round_trip(&RemoteCommand::Invalidate { seat })
            .map(|_| ())
    }

    /// Asks the solver to move for `seat`.
    pub fn request_move(&mut self, seat: PlayerId) -> Result<PlayerMove, RemoteError> {
        let reply = self.round_trip(&RemoteCommand::Get)?;
        parse_move_reply(&reply, seat).map_err(|error| RemoteError::Malformed { reply, error })
    }

    pub fn adjacent(&mut self, cell: Cell) -> Result<Vec<Cell>, RemoteError> {
        let reply = self.round_trip(&RemoteCommand::Adjacent(cell))?;
        parse_cells(&reply).map_err(|error| RemoteError::Malformed { reply, error })
    }

    pub fn path(&mut self, from: Cell, to: Cell) -> Result<Vec<Cell>, RemoteError> {
        let reply = self.round_trip(&RemoteCommand::Path { from, to })?;
        parse_cells(&reply).map_err(|error| RemoteError::Malformed { reply, error })
    }

    /// Sends `command` and reads the single reply line. Acknowledged
    /// commands must get exactly `ack` back.
    fn round_trip(&mut self, command: &RemoteCommand) -> Result<String, RemoteError> {
        writeln!(self.writer, "{}", command)?;
        self.writer.flush()?;

        let reply = self.read_line()?;
        if command.expects_ack() && reply != ACK {
            return Err(RemoteError::BadAck { reply });
        }
        Ok(reply)
    }

    fn read_line(&mut self) -> Result<String, RemoteError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(RemoteError::Disconnected);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

impl Drop for RemoteSolver {
    fn drop(&mut self) {
        debug!("closing solver connection to {}", self.peer);
        // the peer may already be gone
        let _ = self.writer.shutdown(Shutdown::Both);
    }
}
