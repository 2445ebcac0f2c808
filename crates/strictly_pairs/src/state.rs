//! The session state aggregate.

use crate::difficulty::LevelSpec;
use crate::phases::Phase;
use crate::types::{Card, CardId};
use serde::{Deserialize, Serialize};

/// Complete state of one level being played.
///
/// Only the session mutates this; everyone else sees clones in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Board, fixed size for the session's lifetime.
    cards: Vec<Card>,
    /// Ids of the face-up, unresolved cards, in selection order.
    selected: Vec<CardId>,
    /// Resolved non-matching selections.
    moves: u32,
    /// Resolved matching pairs.
    matches: u32,
    /// A two-card selection awaits resolution.
    is_resolving: bool,
    /// All pairs matched.
    is_won: bool,
    /// Budget exhausted without winning.
    is_lost: bool,
    /// Current level (>= 1).
    level: u32,
    /// Matches required to win.
    pairs_needed: u32,
    /// Move budget.
    max_moves: u32,
}

impl SessionState {
    /// Fresh state for `spec` with an already built card set.
    pub(crate) fn new(spec: LevelSpec, cards: Vec<Card>) -> Self {
        Self {
            cards,
            selected: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
            is_resolving: false,
            is_won: false,
            is_lost: false,
            level: spec.level,
            pairs_needed: spec.pairs_needed,
            max_moves: spec.max_moves,
        }
    }

    /// The board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Ids of the selected cards, in selection order.
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    /// Resolved non-matching selections.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Resolved matching pairs.
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Returns true while a selected pair awaits resolution.
    pub fn is_resolving(&self) -> bool {
        self.is_resolving
    }

    /// Returns true once every pair is matched.
    pub fn is_won(&self) -> bool {
        self.is_won
    }

    /// Returns true once the move budget ran out.
    pub fn is_lost(&self) -> bool {
        self.is_lost
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Matches required to win.
    pub fn pairs_needed(&self) -> u32 {
        self.pairs_needed
    }

    /// Move budget.
    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    /// Derives the current phase.
    pub fn phase(&self) -> Phase {
        if self.is_won {
            Phase::Won
        } else if self.is_lost {
            Phase::Lost
        } else if self.is_resolving {
            Phase::Resolving
        } else if self.selected.is_empty() {
            Phase::Idle
        } else {
            Phase::OneSelected
        }
    }

    /// Looks a card up by id.
    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.card_id == card_id)
    }

    /// The selected cards, in selection order.
    pub fn selected_cards(&self) -> impl Iterator<Item = &Card> {
        self.selected.iter().filter_map(|id| self.card(id))
    }

    /// Moves left before the level is lost.
    pub fn moves_remaining(&self) -> u32 {
        self.max_moves.saturating_sub(self.moves)
    }

    /// Cards not yet matched.
    pub fn unmatched_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched).count()
    }

    pub(crate) fn card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| &c.card_id == card_id)
    }

    pub(crate) fn push_selected(&mut self, card_id: CardId) {
        self.selected.push(card_id);
    }

    pub(crate) fn take_selected(&mut self) -> Vec<CardId> {
        std::mem::take(&mut self.selected)
    }

    pub(crate) fn set_resolving(&mut self, resolving: bool) {
        self.is_resolving = resolving;
    }

    pub(crate) fn record_match(&mut self) {
        self.matches += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn set_won(&mut self) {
        self.is_won = true;
    }

    pub(crate) fn set_lost(&mut self) {
        self.is_lost = true;
    }

    /// Raw mutable access for invariant tests.
    #[cfg(test)]
    pub(crate) fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    #[cfg(test)]
    pub(crate) fn selected_mut(&mut self) -> &mut Vec<CardId> {
        &mut self.selected
    }

    #[cfg(test)]
    pub(crate) fn counters_mut(&mut self) -> (&mut u32, &mut u32, &mut bool, &mut bool) {
        (&mut self.moves, &mut self.matches, &mut self.is_won, &mut self.is_lost)
    }
}
