//! Strictly Pairs - memory-matching game logic
//!
//! A grid of face-down cards is dealt from themed content, two cards are
//! revealed at a time, and matching pairs stay face up. Misses are counted
//! against a level-dependent move budget.
//!
//! # Architecture
//!
//! - **Shuffle / Pairing**: Fisher-Yates shuffling of duplicated content into a deck
//! - **Difficulty**: pairs and move budget per level
//! - **Rules**: match evaluation, win and loss conditions
//! - **Session**: the state machine that owns the board and emits events
//! - **Boundaries**: [`ContentSource`], [`Scheduler`], [`SessionObserver`]
//!
//! # Example
//!
//! ```no_run
//! use strictly_pairs::{
//!     CardContent, ContentError, ContentSource, GameSession, ManualScheduler, SessionConfig, Theme,
//! };
//!
//! struct Fixed(Vec<CardContent>);
//!
//! #[async_trait::async_trait]
//! impl ContentSource for Fixed {
//!     async fn fetch_content(&self, count: usize, _theme: Theme) -> Result<Vec<CardContent>, ContentError> {
//!         Ok(self.0.iter().take(count).cloned().collect())
//!     }
//! }
//!
//! # async fn example() -> Result<(), strictly_pairs::SessionError> {
//! let items = (0..8).map(|i| CardContent::new(format!("{i}"), format!("Card {i}"), "img")).collect();
//! let scheduler = ManualScheduler::new();
//! let mut session = GameSession::start(SessionConfig::default(), Fixed(items), scheduler.clone()).await?;
//!
//! session.select_index(0);
//! session.select_index(1);
//! if let Some(ticket) = scheduler.pop() {
//!     let _ = session.resolve_selection(ticket);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod content;
mod contracts;
mod difficulty;
mod error;
mod events;
mod pairing;
mod phases;
mod rules;
mod scheduler;
mod session;
mod shuffle;
mod state;
mod types;

pub mod invariants;

// Crate-level exports - Domain types
pub use types::{Card, CardContent, CardId, ContentId, Theme};

// Crate-level exports - Algorithms
pub use difficulty::{BASE_PAIRS, LevelSpec, MAX_PAIRS, max_moves_for_level, move_buffer, pairs_for_level};
pub use pairing::build_cards;
pub use rules::{is_lost, is_match, is_won};
pub use shuffle::{shuffle, shuffled};

// Crate-level exports - Session
pub use action::{Resolution, ResolutionTicket, SelectOutcome, SelectionError};
pub use config::SessionConfig;
pub use contracts::{CardSelectable, Contract, LegalSelection, LevelInPlay, SelectionContract, SelectionOpen};
pub use error::{SessionError, StaleResolution};
pub use phases::{Outcome, Phase};
pub use session::GameSession;
pub use state::SessionState;

// Crate-level exports - Boundaries
pub use content::{ContentError, ContentSource};
pub use events::{EventRecorder, SessionEvent, SessionObserver, SessionSnapshot};
pub use scheduler::{DEFAULT_RESOLVE_DELAY, ManualScheduler, Scheduled, Scheduler};
