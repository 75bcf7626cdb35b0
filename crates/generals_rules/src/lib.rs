//! Game of the Generals rules engine.
//!
//! Pure game logic with no I/O: the board model, the command interpreter,
//! combat resolution, win detection and the game state machine.
//!
//! # Example
//!
//! ```
//! use generals_rules::{Engine, InlineSetup, RuleOptions, StatusReport, interpret};
//!
//! let setup = InlineSetup::new("SET W A1 FLG\nSET B I8 FLG\nSET W B2 CPT");
//! let mut engine = Engine::new(RuleOptions::default(), Box::new(setup));
//! engine.start();
//!
//! engine.apply(interpret("loadsample")).unwrap();
//! engine.apply(interpret("MV B2 B3")).unwrap();
//! assert_eq!(engine.report().unwrap().to_string(), "Black to move");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod command;
mod contracts;
mod engine;
mod setup;
mod types;

pub mod coord;
pub mod rules;

pub use action::{GameError, Move};
pub use command::{Command, HELP_TEXT, interpret, normalize};
pub use contracts::{Adjacent, Contract, LegalMove, MoveContract, OccupancyAllowed, PlayersTurn};
pub use coord::{COLUMNS, Coord, CoordError, ROWS};
pub use engine::{Engine, Feedback, MoveOutcome, StatusReport};
pub use setup::{InlineSetup, NoSetup, Placement, SetupSource, parse_setup};
pub use types::{
    Board, ChallengeResult, GameState, GameStatus, MoveType, Piece, Player, Rank, RuleOptions,
    Square,
};
