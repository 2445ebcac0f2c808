//! Strictly Pairs - terminal memory-matching game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_pairs_cli::{AppConfig, Cli, Command, levels_table, themes_list};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Levels { max } => {
            print!("{}", levels_table(max));
            Ok(())
        }
        Command::Themes => {
            print!("{}", themes_list());
            Ok(())
        }
    }
}

/// Logs go to stderr so they never interleave with the board.
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the interactive game
#[instrument(skip(args), fields(config = %args.config.display()))]
async fn run_play(args: strictly_pairs_cli::PlayArgs) -> Result<()> {
    let config = args.apply(AppConfig::load(&args.config)?);
    debug!(game = ?config.game(), provider = %config.content().provider(), "Resolved configuration");
    strictly_pairs_cli::run(config).await
}
