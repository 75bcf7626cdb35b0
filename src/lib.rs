//! Game of the Generals in the terminal.
//!
//! The rules live in [`generals_rules`]; this crate adds the thin shell
//! around them: terminal input and output, the board renderer, the setup
//! file source, configuration and the turn loop.
//!
//! # Example
//!
//! ```
//! use generals::{Driver, LineInput, WriterOutput};
//! use generals::rules::{Engine, InlineSetup, RuleOptions};
//!
//! let setup = InlineSetup::new("SET W A1 FLG\nSET B I8 FLG\nSET W E7 MAJ");
//! let engine = Engine::new(RuleOptions::default(), Box::new(setup));
//! let input = LineInput::new("loadsample\nMV E7 E8\nexit\n".as_bytes());
//!
//! let mut driver = Driver::new(engine, input, WriterOutput::new(Vec::new()));
//! driver.run();
//!
//! let (engine, _, output) = driver.into_parts();
//! assert!(!engine.is_running());
//! assert!(String::from_utf8(output.into_inner()).unwrap().contains("Black to move"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod io;
pub mod render;

pub use generals_rules as rules;

pub use cli::Cli;
pub use config::{ConfigError, GameConfig};
pub use driver::Driver;
pub use io::{FileSetup, Input, LineInput, Output, WriterOutput};
pub use render::render_board;
