//! Line protocol spoken between the agent and a remote solver.
//!
//! Every message is one ASCII line. Seats are 1-based on the wire and
//! 0-based everywhere else; conversion happens only in this module.
//!
//! ```text
//! client                               server
//! <seat> <walls> <r>,<c>|inv ...       ack
//! m <seat> <r>,<c>                     ack      (pawn now at r,c)
//! w <seat> <r1>,<c1> <r2>,<c2>         ack
//! i <seat>                             ack
//! g                                    <m|w> <r1>,<c1> <r2>,<c2>
//! adj <r>,<c>                          <r>,<c> ...
//! path <r1>,<c1> <r2>,<c2>             <r>,<c> ...   (empty when unreachable)
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::cell::ParseCellError;
use crate::board::{Cell, PlayerId, Wall};
use crate::player_move::PlayerMove;

pub const DEFAULT_PORT: u16 = 51894;
pub const ACK: &str = "ack";
const ABSENT: &str = "inv";

static MOVE_REPLY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([mw]) (\d+,\d+) (\d+,\d+)$").expect("move reply pattern is a valid regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("malformed message `{0}`")]
    Malformed(String),
    #[error("invalid seat `{0}`")]
    InvalidSeat(String),
    #[error(transparent)]
    Cell(#[from] ParseCellError),
}

/// A message from the client to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    Init {
        seat: PlayerId,
        walls: u8,
        positions: Vec<Option<Cell>>,
    },
    /// A pawn move, identified by its destination.
    Move { seat: PlayerId, to: Cell },
    Wall(Wall),
    Invalidate { seat: PlayerId },
    Get,
    Adjacent(Cell),
    Path { from: Cell, to: Cell },
}

impl RemoteCommand {
    /// The notification announcing a confirmed move.
    pub fn for_move(player_move: &PlayerMove) -> Self {
        match *player_move {
            PlayerMove::Pawn { player, to, .. } => RemoteCommand::Move { seat: player, to },
            PlayerMove::Wall(wall) => RemoteCommand::Wall(wall),
        }
    }

    /// Whether the solver answers with a bare `ack`.
    pub fn expects_ack(&self) -> bool {
        !matches!(
            self,
            RemoteCommand::Get | RemoteCommand::Adjacent(_) | RemoteCommand::Path { .. }
        )
    }
}

pub fn seat_to_wire(seat: PlayerId) -> usize {
    seat + 1
}

pub fn seat_from_wire(token: &str) -> Result<PlayerId, ProtocolError> {
    match token.parse::<usize>() {
        Ok(seat) if seat >= 1 => Ok(seat - 1),
        _ => Err(ProtocolError::InvalidSeat(token.to_string())),
    }
}

fn expect_parts<'a>(
    line: &str,
    parts: &'a [&'a str],
    count: usize,
) -> Result<&'a [&'a str], ProtocolError> {
    if parts.len() == count {
        Ok(parts)
    } else {
        Err(ProtocolError::Malformed(line.to_string()))
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCommand::Init {
                seat,
                walls,
                positions,
            } => {
                write!(f, "{} {} ", seat_to_wire(*seat), walls)?;
                for position in positions {
                    match position {
                        Some(cell) => write!(f, "{} ", cell)?,
                        None => write!(f, "{} ", ABSENT)?,
                    }
                }
                Ok(())
            }
            RemoteCommand::Move { seat, to } => write!(f, "m {} {}", seat_to_wire(*seat), to),
            RemoteCommand::Wall(wall) => {
                write!(f, "w {} {} {}", seat_to_wire(wall.owner), wall.start, wall.end)
            }
            RemoteCommand::Invalidate { seat } => write!(f, "i {}", seat_to_wire(*seat)),
            RemoteCommand::Get => write!(f, "g"),
            RemoteCommand::Adjacent(cell) => write!(f, "adj {}", cell),
            RemoteCommand::Path { from, to } => write!(f, "path {} {}", from, to),
        }
    }
}

impl FromStr for RemoteCommand {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Err(ProtocolError::Empty);
        };

        match command {
            "m" => {
                let parts = expect_parts(line, &parts, 3)?;
                Ok(RemoteCommand::Move {
                    seat: seat_from_wire(parts[1])?,
                    to: parts[2].parse()?,
                })
            }
            "w" => {
                let parts = expect_parts(line, &parts, 4)?;
                Ok(RemoteCommand::Wall(Wall::new(
                    seat_from_wire(parts[1])?,
                    parts[2].parse()?,
                    parts[3].parse()?,
                )))
            }
            "i" => {
                let parts = expect_parts(line, &parts, 2)?;
                Ok(RemoteCommand::Invalidate {
                    seat: seat_from_wire(parts[1])?,
                })
            }
            "g" => {
                expect_parts(line, &parts, 1)?;
                Ok(RemoteCommand::Get)
            }
            "adj" => {
                let parts = expect_parts(line, &parts, 2)?;
                Ok(RemoteCommand::Adjacent(parts[1].parse()?))
            }
            "path" => {
                let parts = expect_parts(line, &parts, 3)?;
                Ok(RemoteCommand::Path {
                    from: parts[1].parse()?,
                    to: parts[2].parse()?,
                })
            }
            token if token.bytes().all(|byte| byte.is_ascii_digit()) => parse_init(line, &parts),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_init(line: &str, parts: &[&str]) -> Result<RemoteCommand, ProtocolError> {
    if parts.len() < 4 {
        return Err(ProtocolError::Malformed(line.to_string()));
    }
    let seat = seat_from_wire(parts[0])?;
    let walls = parts[1]
        .parse()
        .map_err(|_| ProtocolError::Malformed(line.to_string()))?;
    let positions = parts[2..]
        .iter()
        .map(|token| match *token {
            ABSENT => Ok(None),
            cell => cell.parse().map(Some),
        })
        .collect::<Result<Vec<_>, ParseCellError>>()?;
    Ok(RemoteCommand::Init {
        seat,
        walls,
        positions,
    })
}

/// The solver's answer to `g`. A pawn reply carries source and destination.
pub fn format_move_reply(player_move: &PlayerMove) -> String {
    let (first, second) = player_move.endpoints();
    format!("{} {} {}", player_move.kind(), first, second)
}

/// Reads the solver's answer to `g` as a move for `seat`.
pub fn parse_move_reply(line: &str, seat: PlayerId) -> Result<PlayerMove, ProtocolError> {
    let caps = MOVE_REPLY_PATTERN
        .captures(line.trim())
        .ok_or_else(|| ProtocolError::Malformed(line.to_string()))?;
    let first: Cell = caps[2].parse()?;
    let second: Cell = caps[3].parse()?;
    Ok(match &caps[1] {
        "m" => PlayerMove::pawn(seat, first, second),
        _ => PlayerMove::Wall(Wall::new(seat, first, second)),
    })
}

pub fn format_cells(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_cells(line: &str) -> Result<Vec<Cell>, ProtocolError> {
    Ok(line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<Cell>, _>>()?)
}
