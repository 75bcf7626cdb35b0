//! Game of the Generals - terminal entry point.

use anyhow::Result;
use clap::Parser;
use generals::config::{self, GameConfig};
use generals::rules::Engine;
use generals::{Cli, Driver, FileSetup, LineInput, WriterOutput};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let config = GameConfig::load_or_fallback(&config::config_path());
    info!(?config, "Configuration ready");

    let engine = Engine::new(
        config.rule_options(),
        Box::new(FileSetup::new(config.setup_file().clone())),
    );

    let mut driver = Driver::new(engine, LineInput::stdin(), WriterOutput::stdout());
    driver.run();

    info!("Goodbye");
    Ok(())
}

fn initialize_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,generals=debug,generals_rules=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(verbose, "Tracing initialized");
}
