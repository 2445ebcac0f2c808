//! Command-line interface for strictly_pairs.

use crate::config::{AppConfig, Provider};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_pairs::Theme;

/// Strictly Pairs - memory-matching card game
#[derive(Parser, Debug)]
#[command(name = "strictly_pairs")]
#[command(about = "Memory-matching card game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log filter (e.g. "debug", "strictly_pairs=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play(PlayArgs),

    /// Print the difficulty table
    Levels {
        /// Last level to show
        #[arg(long, default_value = "13")]
        max: u32,
    },

    /// List available themes
    Themes,
}

/// Options for `play`; each one overrides the config file.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Level to start at
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Card theme (vaporwave, fantasy, horror, oldstyle, retro)
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Shuffle seed for a reproducible deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Content provider (builtin, rawg)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// Pause before a revealed pair resolves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Path to TOML config (skipped if missing)
    #[arg(short, long, default_value = "strictly_pairs.toml")]
    pub config: PathBuf,
}

impl PlayArgs {
    /// Applies the flags given on the command line on top of `config`.
    pub fn apply(&self, config: AppConfig) -> AppConfig {
        let mut game = config.game().clone();
        if let Some(level) = self.level {
            game = game.with_level(level);
        }
        if let Some(theme) = self.theme {
            game = game.with_theme(theme);
        }
        if let Some(seed) = self.seed {
            game = game.with_seed(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            game = game.with_resolve_delay_ms(delay_ms);
        }

        let mut content = config.content().clone();
        if let Some(provider) = self.provider {
            content = content.with_provider(provider);
        }

        config.with_game(game).with_content(content)
    }
}
