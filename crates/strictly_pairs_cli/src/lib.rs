//! Strictly Pairs terminal front end
//!
//! Wires the [`strictly_pairs`] engine to a terminal: configuration from
//! TOML and the environment, a tokio-backed resolution timer, a board
//! renderer and feedback cues.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod feedback;
mod play;
mod scheduler;
mod view;

// Crate-level exports
pub use cli::{Cli, Command, PlayArgs};
pub use config::{AppConfig, ConfigError, ContentConfig, Provider, RAWG_API_KEY_VAR};
pub use feedback::{Cue, CueSink, FeedbackCues, OUTCOME_CUE_DELAY, TerminalBell};
pub use play::{HELP, Input, InputError, apply_input, run};
pub use scheduler::TokioScheduler;
pub use view::{TerminalView, columns_for, levels_table, render, themes_list};
