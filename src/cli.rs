//! Command-line interface for generals.

use clap::Parser;

/// Game of the Generals - two players, one terminal
#[derive(Parser, Debug)]
#[command(name = "generals")]
#[command(about = "Play Game of the Generals in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log engine diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
