//! Command interpreter: raw text lines into typed commands.
//!
//! Interpretation is a pure function of the line. Whitespace is collapsed
//! first, then literal commands are tried before the `SET` and `MV`
//! patterns; the first match wins.

use crate::action::Move;
use crate::coord::{Coord, decode};
use crate::types::{Player, Rank};
use tracing::{debug, instrument};

/// Help shown at startup and for the `help` command.
pub const HELP_TEXT: &str = "\
Commands:
  SET <W|B> <square> <rank>   place a piece, e.g. SET W A1 FLG
  MV <from> <to>              move a piece one square, e.g. MV A1 A2
  loadsample                  load the sample setup and start playing
  ready                       finish setting up and start playing
  help                        show this help
  exit                        quit the game
Ranks: 5SG 4SG 3SG 2SG 1SG COL LTC MAJ CPT 1LT 2LT SGT PVT SPY FLG
Squares: columns A-I, rows 1-8";

/// A typed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `help`
    ShowHelp,
    /// `exit`
    Terminate,
    /// `loadsample`
    LoadSetupFile,
    /// `ready`
    Ready,
    /// `SET <player> <square> <rank>`
    PlacePiece {
        /// Owner of the new piece.
        player: Player,
        /// Square to place it on.
        coord: Coord,
        /// Rank of the new piece.
        rank: Rank,
    },
    /// `MV <from> <to>`
    MovePiece(Move),
    /// Anything else.
    Invalid,
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Interprets one raw line.
#[instrument(ret)]
pub fn interpret(raw: &str) -> Command {
    let line = normalize(raw);

    let command = match line.as_str() {
        "help" => Command::ShowHelp,
        "exit" => Command::Terminate,
        "loadsample" => Command::LoadSetupFile,
        "ready" => Command::Ready,
        _ => parse_set(&line)
            .or_else(|| parse_move(&line))
            .unwrap_or(Command::Invalid),
    };

    if command == Command::Invalid {
        debug!(line = %line, "Unrecognized command");
    }
    command
}

/// Parses `SET <W|B> <square> <rank>`.
fn parse_set(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let ["SET", player, square, code] = tokens.as_slice() else {
        return None;
    };
    if code.len() != 3 {
        return None;
    }

    Some(Command::PlacePiece {
        player: Player::from_letter(player)?,
        coord: decode(square).ok()?,
        rank: Rank::from_code(code)?,
    })
}

/// Parses `MV <from> <to>`.
fn parse_move(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let ["MV", from, to] = tokens.as_slice() else {
        return None;
    };

    Some(Command::MovePiece(Move::new(decode(from).ok()?, decode(to).ok()?)))
}
