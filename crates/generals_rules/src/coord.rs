//! Square labels and board coordinates.
//!
//! A label is a column letter `A`-`I` followed by a row digit `1`-`8`.
//! Internally a [`Coord`] stores zero-based indices, so `A1` is column 0,
//! row 0 and `I8` is column 8, row 7.

use std::str::FromStr;
use tracing::instrument;

/// Number of rows on the board.
pub const ROWS: usize = 8;

/// Number of columns on the board.
pub const COLUMNS: usize = 9;

/// A validated square on the 9x8 board.
///
/// A `Coord` can only be built from in-range indices, so every value
/// addresses a real square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    column: u8,
    row: u8,
}

impl Coord {
    /// Creates a coordinate from zero-based indices, or `None` if off the board.
    pub fn new(column: usize, row: usize) -> Option<Self> {
        if column < COLUMNS && row < ROWS {
            Some(Self {
                column: column as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Zero-based column index (`A` = 0).
    pub fn column(self) -> usize {
        self.column as usize
    }

    /// Zero-based row index (`1` = 0).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Two-character label for this square.
    pub fn label(self) -> String {
        format!("{}{}", (b'A' + self.column) as char, self.row + 1)
    }

    /// Chebyshev distance: the number of king steps between two squares.
    pub fn distance(self, other: Coord) -> usize {
        let dc = self.column.abs_diff(other.column);
        let dr = self.row.abs_diff(other.row);
        dc.max(dr) as usize
    }

    /// True when both the row and the column differ.
    pub fn is_diagonal_to(self, other: Coord) -> bool {
        self.column != other.column && self.row != other.row
    }

    /// Every square, row by row from `A1` to `I8`.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..ROWS).flat_map(|row| (0..COLUMNS).filter_map(move |column| Coord::new(column, row)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Error produced when a label does not name a square.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CoordError {
    /// The label does not match `[A-I][1-8]`.
    #[display("'{}' is not a square label (expected A1 to I8)", _0)]
    InvalidLabel(String),
}

impl std::error::Error for CoordError {}

/// Decodes a label such as `E4` into a coordinate.
///
/// # Errors
///
/// Returns [`CoordError::InvalidLabel`] for anything outside `[A-I][1-8]`,
/// including lowercase letters and extra characters.
#[instrument]
pub fn decode(label: &str) -> Result<Coord, CoordError> {
    match label.as_bytes() {
        [letter @ b'A'..=b'I', digit @ b'1'..=b'8'] => {
            let column = (letter - b'A') as usize;
            let row = (digit - b'1') as usize;
            Coord::new(column, row).ok_or_else(|| CoordError::InvalidLabel(label.to_string()))
        }
        _ => Err(CoordError::InvalidLabel(label.to_string())),
    }
}

/// Encodes zero-based indices as a label, or `None` when off the board.
#[instrument]
pub fn encode(column: usize, row: usize) -> Option<String> {
    Coord::new(column, row).map(Coord::label)
}
