//! Serves the line protocol, one client at a time, from a local engine.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use log::{debug, info, warn};
use thiserror::Error;

use crate::engine::{Engine, EngineConfig, EngineError};
use crate::player_move::PlayerMove;

use super::protocol::{format_cells, format_move_reply, ProtocolError, RemoteCommand, ACK};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("connection failed: {0}")]
    Io(#[from] io::Error),
    #[error("bad message: {0}")]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("received a game message before the game setup")]
    NotInitialized,
}

pub struct RemoteServer {
    listener: TcpListener,
    config: EngineConfig,
}

impl RemoteServer {
    /// Binds the listening socket. The engine behind it never delegates
    /// further, whatever `config` says.
    pub fn bind<A: ToSocketAddrs>(address: A, config: EngineConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(address)?;
        Ok(Self {
            listener,
            config: EngineConfig {
                remote_address: None,
                ..config
            },
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts clients forever. A failed session is logged and the next
    /// client is served.
    pub fn serve(&self) -> io::Result<()> {
        info!("serving on {}", self.local_addr()?);
        loop {
            if let Err(error) = self.accept_one() {
                warn!("session ended with an error: {}", error);
            }
        }
    }

    /// Waits for one client and serves it until it disconnects.
    pub fn accept_one(&self) -> Result<(), ServerError> {
        let (stream, peer) = self.listener.accept()?;
        info!("client connected from {}", peer);
        self.serve_one(stream)
    }

    pub fn serve_one(&self, stream: TcpStream) -> Result<(), ServerError> {
        let mut writer = stream.try_clone()?;
        let mut engine: Option<Engine> = None;

        for line in BufReader::new(stream).lines() {
            let line = line?;
            debug!("<- {}", line);
            let reply = self.respond(&mut engine, line.parse()?)?;
            debug!("-> {}", reply);
            writeln!(writer, "{}", reply)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Applies one client message. A repeated setup starts a new game.
    fn respond(
        &self,
        engine: &mut Option<Engine>,
        command: RemoteCommand,
    ) -> Result<String, ServerError> {
        let reply = match command {
            RemoteCommand::Init {
                seat,
                walls,
                positions,
            } => {
                *engine = Some(Engine::with_config(
                    seat,
                    walls,
                    &positions,
                    self.config.clone(),
                )?);
                ACK.to_string()
            }
            RemoteCommand::Move { seat, to } => {
                let engine = initialised(engine)?;
                let from = engine
                    .board()
                    .player(seat)
                    .map_err(EngineError::from)?
                    .location
                    .unwrap_or(to);
                engine.on_move_applied(&PlayerMove::pawn(seat, from, to))?;
                ACK.to_string()
            }
            RemoteCommand::Wall(wall) => {
                initialised(engine)?.on_move_applied(&PlayerMove::Wall(wall))?;
                ACK.to_string()
            }
            RemoteCommand::Invalidate { seat } => {
                initialised(engine)?.on_player_invalidated(seat)?;
                ACK.to_string()
            }
            RemoteCommand::Get => format_move_reply(&initialised(engine)?.request_move()?),
            RemoteCommand::Adjacent(cell) => {
                format_cells(&initialised(engine)?.neighbors_of(cell))
            }
            RemoteCommand::Path { from, to } => {
                format_cells(&initialised(engine)?.shortest_path_between(from, to))
            }
        };
        Ok(reply)
    }
}

fn initialised(engine: &mut Option<Engine>) -> Result<&mut Engine, ServerError> {
    engine.as_mut().ok_or(ServerError::NotInitialized)
}
