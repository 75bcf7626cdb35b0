//! First-class action types for Game of the Generals.
//!
//! A [`Move`] is the player's intent to step one piece from one square to
//! another. It can be validated against a state before it is applied.

use crate::coord::Coord;
use crate::types::{GameStatus, Player};
use tracing::instrument;

/// A request to move the piece on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Square the piece leaves.
    pub from: Coord,
    /// Square the piece enters or challenges.
    pub to: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Error that can occur when interpreting or applying a command.
///
/// Every variant is recoverable: the engine state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The line did not match any command.
    #[display("Invalid command.")]
    InvalidCommand,

    /// The engine has not been started yet.
    #[display("The game has not started yet")]
    NotStarted,

    /// The command needs a game in progress.
    #[display("Not allowed while the game is {}", _0)]
    NotInProgress(GameStatus),

    /// The command is only valid during setup.
    #[display("Setup is already complete")]
    SetupComplete,

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// Pieces move one square at a time.
    #[display("{} is not next to {}", from, to)]
    NotAdjacent {
        /// Origin square.
        from: Coord,
        /// Requested destination.
        to: Coord,
    },

    /// Diagonal steps are disabled.
    #[display("Diagonal moves are not allowed ({} -> {})", from, to)]
    DiagonalNotAllowed {
        /// Origin square.
        from: Coord,
        /// Requested destination.
        to: Coord,
    },

    /// The piece on the origin square belongs to the other player.
    #[display("The piece on {} does not belong to {}", square, player)]
    NotYourPiece {
        /// Origin square.
        square: Coord,
        /// Player on move.
        player: Player,
    },

    /// There is no piece to move.
    #[display("There is no piece on {}", _0)]
    EmptyOrigin(Coord),

    /// The destination holds one of the mover's own pieces.
    #[display("{} is occupied by your own piece", _0)]
    OwnPieceAtTarget(Coord),

    /// The setup source could not be read.
    #[display("Setup source unavailable: {}", _0)]
    SetupUnavailable(String),

    /// A setup line is not a valid placement.
    #[display("Setup line {} is not a valid SET command: {}", line, text)]
    InvalidSetupLine {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A postcondition failed after applying a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}
