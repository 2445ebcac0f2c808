//! Session error types.

use crate::action::ResolutionTicket;
use crate::content::ContentError;
use derive_more::{Display, Error, From};
use tracing::{instrument, warn};

/// Failure to (re)initialize a session. The previous state is left intact.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// The content source returned fewer distinct items than the level needs.
    #[display("Content unavailable: needed {} distinct items, got {}", requested, supplied)]
    #[from(skip)]
    ContentUnavailable {
        /// Distinct items the level needs.
        requested: usize,
        /// Distinct items actually supplied.
        supplied: usize,
    },

    /// The content source failed outright.
    #[display("{}", _0)]
    Content(ContentError),
}

/// A resolution ticket that no longer belongs to the live session.
///
/// Issued when a ticket arrives after a restart, or does not name the
/// pair currently awaiting resolution. The ticket is dropped unapplied.
#[derive(Debug, Clone, Display, Error)]
#[display(
    "Stale resolution for generation {} (current {}) at {}:{}",
    ticket.generation,
    current_generation,
    file,
    line
)]
pub struct StaleResolution {
    /// The rejected ticket.
    pub ticket: ResolutionTicket,
    /// Generation of the live session.
    pub current_generation: u64,
    /// Line number where the ticket was rejected.
    pub line: u32,
    /// Source file where the ticket was rejected.
    pub file: &'static str,
}

impl StaleResolution {
    /// Records a dropped ticket with caller location tracking.
    #[track_caller]
    #[instrument(skip(ticket), fields(ticket_generation = ticket.generation))]
    pub fn new(ticket: ResolutionTicket, current_generation: u64) -> Self {
        let loc = std::panic::Location::caller();
        warn!(current_generation, "Dropping stale resolution ticket");
        Self {
            ticket,
            current_generation,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
