//! Setup sources and the `.gggn` placement format.
//!
//! A setup is plain text, one command per line. Blank lines and lines
//! starting with `#` are skipped; every other line must be a `SET`
//! command. Lines are applied in order and the end of the text ends setup.

use crate::action::GameError;
use crate::command::{Command, interpret};
use crate::coord::Coord;
use crate::types::{Piece, Player, Rank};
use tracing::{debug, instrument, warn};

/// Somewhere a setup can be read from.
pub trait SetupSource: std::fmt::Debug {
    /// Reads the whole setup text.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SetupUnavailable`] when the source cannot be read.
    fn read_setup(&self) -> Result<String, GameError>;
}

/// Setup text held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSetup {
    text: String,
}

impl InlineSetup {
    /// Wraps `text` as a setup source.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SetupSource for InlineSetup {
    fn read_setup(&self) -> Result<String, GameError> {
        Ok(self.text.clone())
    }
}

/// A source that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSetup;

impl SetupSource for NoSetup {
    fn read_setup(&self) -> Result<String, GameError> {
        Err(GameError::SetupUnavailable(
            "no setup source configured".to_string(),
        ))
    }
}

/// One placement read from a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Square to place on.
    pub coord: Coord,
    /// Piece to place.
    pub piece: Piece,
}

impl Placement {
    /// Creates a placement of `player`'s `rank` on `coord`.
    pub fn new(player: Player, coord: Coord, rank: Rank) -> Self {
        Self {
            coord,
            piece: Piece::new(player, rank),
        }
    }
}

/// Parses setup text into placements without applying any of them.
///
/// # Errors
///
/// Returns [`GameError::InvalidSetupLine`] for the first line that is
/// neither skippable nor a valid `SET` command.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_setup(text: &str) -> Result<Vec<Placement>, GameError> {
    let mut placements = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match interpret(line) {
            Command::PlacePiece {
                player,
                coord,
                rank,
            } => placements.push(Placement::new(player, coord, rank)),
            other => {
                warn!(line = index + 1, ?other, "Setup line is not a placement");
                return Err(GameError::InvalidSetupLine {
                    line: index + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    debug!(count = placements.len(), "Parsed setup");
    Ok(placements)
}
