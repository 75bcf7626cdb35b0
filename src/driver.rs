//! Turn loop driving the engine from raw input.
//!
//! Each turn draws the board, reads and applies one command, checks for a
//! winner and reports the result.

use crate::io::{Input, Output};
use crate::render::render_board;
use generals_rules::{Command, Engine, interpret};
use tracing::{debug, info, instrument};

/// Prompt shown before each command.
pub const PROMPT: &str = "Enter command: ";

/// Runs one game between the engine and a pair of I/O collaborators.
#[derive(Debug)]
pub struct Driver<I, O> {
    engine: Engine,
    input: I,
    output: O,
}

impl<I: Input, O: Output> Driver<I, O> {
    /// Creates a driver around a fresh engine.
    pub fn new(engine: Engine, input: I, output: O) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Splits the driver back into its parts.
    pub fn into_parts(self) -> (Engine, I, O) {
        (self.engine, self.input, self.output)
    }

    /// Plays until the game is over.
    #[instrument(skip(self))]
    pub fn run(&mut self) {
        self.start();

        while self.engine.is_running() {
            self.draw_board();
            self.get_command();
            self.determine_result();
            self.show_result();
        }

        self.quit();
    }

    fn start(&mut self) {
        info!("Starting generals");
        let help = self.engine.start();
        self.output.write_line(help);
    }

    fn draw_board(&mut self) {
        debug!("Drawing board");
        let board = render_board(self.engine.state().board());
        self.output.write(&board);
    }

    /// Reads one command and applies it.
    fn get_command(&mut self) {
        debug!("Fetching player command");
        self.output.write(PROMPT);

        let command = match self.input.read() {
            Some(line) => interpret(&line),
            None => {
                info!("Input closed, exiting");
                Command::Terminate
            }
        };

        match self.engine.apply(command) {
            Ok(feedback) => self.output.write_line(&feedback.to_string()),
            Err(error) => self.output.write_line(&error.to_string()),
        }
    }

    fn determine_result(&mut self) {
        debug!("Determining result");
        self.engine.evaluate();
    }

    fn show_result(&mut self) {
        if let Some(report) = self.engine.report() {
            self.output.write_line(&report.to_string());
        }
    }

    fn quit(&mut self) {
        info!(winner = ?self.engine.winner(), "Quitting game");
    }
}
