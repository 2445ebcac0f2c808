//! Board shape invariants: size, id uniqueness, pairing.

use super::Invariant;
use crate::state::SessionState;
use std::collections::{HashMap, HashSet};

/// Invariant: the board holds exactly two cards per pair needed.
pub struct CardCountInvariant;

impl Invariant<SessionState> for CardCountInvariant {
    fn holds(state: &SessionState) -> bool {
        state.cards().len() == 2 * state.pairs_needed() as usize
    }

    fn description() -> &'static str {
        "Board holds exactly two cards per pair"
    }
}

/// Invariant: no two cards share a card id.
pub struct UniqueCardIdsInvariant;

impl Invariant<SessionState> for UniqueCardIdsInvariant {
    fn holds(state: &SessionState) -> bool {
        let mut seen = HashSet::with_capacity(state.cards().len());
        state.cards().iter().all(|card| seen.insert(&card.card_id))
    }

    fn description() -> &'static str {
        "Card ids are unique"
    }
}

/// Invariant: every content id appears on exactly two cards.
pub struct PairedContentInvariant;

impl Invariant<SessionState> for PairedContentInvariant {
    fn holds(state: &SessionState) -> bool {
        let mut counts = HashMap::new();
        for card in state.cards() {
            *counts.entry(&card.content_id).or_insert(0usize) += 1;
        }
        counts.values().all(|&n| n == 2)
    }

    fn description() -> &'static str {
        "Every content id appears on exactly two cards"
    }
}
