//! Contract-based validation for card selection.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} select {Q}. Preconditions decide whether a selection is accepted;
//! postconditions re-check the session invariants in debug builds.

use crate::action::SelectionError;
use crate::invariants::{InvariantSet, InvariantViolation, SessionInvariants};
use crate::state::SessionState;
use crate::types::CardId;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SelectionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Selection Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the level is neither won nor lost.
pub struct LevelInPlay;

impl LevelInPlay {
    /// Rejects selections once the level is over.
    pub fn check(state: &SessionState) -> Result<(), SelectionError> {
        if state.is_won() || state.is_lost() {
            Err(SelectionError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no pair is waiting for resolution and fewer than two cards are up.
pub struct SelectionOpen;

impl SelectionOpen {
    /// Rejects selections while a pair is pending.
    pub fn check(state: &SessionState) -> Result<(), SelectionError> {
        if state.is_resolving() {
            Err(SelectionError::Resolving)
        } else if state.selected().len() >= 2 {
            Err(SelectionError::SelectionFull)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the card exists, is face down and unmatched.
pub struct CardSelectable;

impl CardSelectable {
    /// Rejects unknown, face-up and matched cards.
    pub fn check(state: &SessionState, card_id: &CardId) -> Result<(), SelectionError> {
        let card = state
            .card(card_id)
            .ok_or_else(|| SelectionError::UnknownCard(card_id.clone()))?;
        if card.is_matched {
            Err(SelectionError::AlreadyMatched(card_id.clone()))
        } else if card.is_flipped {
            Err(SelectionError::AlreadyFlipped(card_id.clone()))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: a selection is legal if the level is in play,
/// the selection is open and the card can be turned.
pub struct LegalSelection;

impl LegalSelection {
    /// Validates all preconditions for a selection.
    #[instrument(skip(state))]
    pub fn check(state: &SessionState, card_id: &CardId) -> Result<(), SelectionError> {
        LevelInPlay::check(state)?;
        SelectionOpen::check(state)?;
        CardSelectable::check(state, card_id)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Selection Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for card selection.
///
/// Preconditions:
/// - Level in play
/// - No pending resolution, fewer than two cards up
/// - Card exists, face down, unmatched
///
/// Postconditions:
/// - Every session invariant holds
/// - Exactly one more card is selected
/// - Moves, matches and level are unchanged
pub struct SelectionContract;

impl Contract<SessionState, CardId> for SelectionContract {
    fn pre(state: &SessionState, card_id: &CardId) -> Result<(), SelectionError> {
        LegalSelection::check(state, card_id)
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = SessionInvariants::check_all(after).err().unwrap_or_default();

        if after.selected().len() != before.selected().len() + 1 {
            violations.push(InvariantViolation::new(format!(
                "Selection went from {} to {} cards",
                before.selected().len(),
                after.selected().len()
            )));
        }
        if after.moves() != before.moves() || after.matches() != before.matches() {
            violations.push(InvariantViolation::new("Selection changed the move or match count"));
        }
        if after.level() != before.level() {
            violations.push(InvariantViolation::new("Selection changed the level"));
        }

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Asserts the selection postconditions (panics on violation in debug builds).
#[instrument(skip(before, after))]
pub fn assert_selection(before: &SessionState, after: &SessionState) {
    if let Err(violations) = SelectionContract::post(before, after) {
        for violation in &violations {
            warn!(invariant = %violation.description, "Selection postcondition violated");
        }
        debug_assert!(violations.is_empty(), "Selection postconditions violated: {:?}", violations);
    }
}

/// Asserts that all session invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &SessionState) {
    if cfg!(debug_assertions)
        && let Err(violations) = SessionInvariants::check_all(state)
    {
        for violation in &violations {
            warn!(invariant = %violation.description, "Session invariant violated");
        }
        debug_assert!(violations.is_empty(), "Session invariants violated: {:?}", violations);
    }
}
