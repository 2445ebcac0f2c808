//! Selection and resolution as first-class values.
//!
//! A selection either flips a card, completes a pair (handing back a
//! ticket for the delayed resolution) or is ignored with a reason.

use crate::types::{CardId, ContentId};
use serde::{Deserialize, Serialize};

/// Why a selection was ignored.
///
/// These are never raised to the presentation layer as failures; the
/// session absorbs them and reports them in [`SelectOutcome::Ignored`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SelectionError {
    /// No card with this id is on the board.
    #[display("Card {} is not on the board", _0)]
    UnknownCard(CardId),

    /// No card at this grid position.
    #[display("No card at position {}", _0)]
    NoCardAtIndex(usize),

    /// The card is already face up (includes re-selecting a selected card).
    #[display("Card {} is already face up", _0)]
    AlreadyFlipped(CardId),

    /// The card belongs to a matched pair.
    #[display("Card {} is already matched", _0)]
    AlreadyMatched(CardId),

    /// A pair is being resolved.
    #[display("A selected pair is being resolved")]
    Resolving,

    /// Two cards are already selected.
    #[display("Two cards are already selected")]
    SelectionFull,

    /// The level is over.
    #[display("The level is already over")]
    GameOver,
}

impl std::error::Error for SelectionError {}

/// Handle for a pending resolution, delivered back by the scheduler.
///
/// Carries the session generation it was issued under so a ticket from a
/// superseded session can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct ResolutionTicket {
    /// Session generation at issue time.
    pub generation: u64,
    /// First selected card.
    pub first: CardId,
    /// Second selected card.
    pub second: CardId,
}

/// Result of a card selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First card of a pair turned face up.
    Flipped(CardId),
    /// Second card turned face up; resolution has been scheduled.
    AwaitingResolution(ResolutionTicket),
    /// Selection rejected, state unchanged.
    Ignored(SelectionError),
}

impl SelectOutcome {
    /// Returns true if the selection changed the board.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }

    /// Returns the scheduled ticket, if this selection completed a pair.
    pub fn ticket(&self) -> Option<&ResolutionTicket> {
        match self {
            SelectOutcome::AwaitingResolution(ticket) => Some(ticket),
            _ => None,
        }
    }
}

/// What a resolution did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Pair matched, level continues.
    Match(ContentId),
    /// Cards turned back face down, level continues.
    Mismatch,
    /// Final pair matched.
    Won,
    /// Miss that spent the last move.
    Lost,
}

impl Resolution {
    /// Returns true if the resolution matched a pair.
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Match(_) | Resolution::Won)
    }
}
