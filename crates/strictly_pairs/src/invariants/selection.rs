//! Selection invariant.

use super::Invariant;
use crate::state::SessionState;

/// Invariant: at most two distinct cards are selected, each on the board,
/// face up and unmatched; resolution is pending exactly when two are selected.
pub struct SelectionInvariant;

impl Invariant<SessionState> for SelectionInvariant {
    fn holds(state: &SessionState) -> bool {
        let selected = state.selected();
        if selected.len() > 2 {
            return false;
        }
        if selected.len() == 2 && selected[0] == selected[1] {
            return false;
        }
        if state.is_resolving() != (selected.len() == 2) {
            return false;
        }
        selected.iter().all(|id| {
            state
                .card(id)
                .is_some_and(|card| card.is_flipped && !card.is_matched)
        })
    }

    fn description() -> &'static str {
        "Selection holds at most two face-up unmatched cards"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures;
    use crate::types::CardId;

    #[test]
    fn test_empty_selection_holds() {
        assert!(SelectionInvariant::holds(&fixtures::level_one()));
    }

    #[test]
    fn test_face_down_selected_card_violates() {
        let mut state = fixtures::level_one();
        let id = state.cards()[0].card_id.clone();
        state.selected_mut().push(id);
        assert!(!SelectionInvariant::holds(&state));
    }

    #[test]
    fn test_unknown_selected_card_violates() {
        let mut state = fixtures::level_one();
        state.selected_mut().push(CardId::from("ghost-1"));
        assert!(!SelectionInvariant::holds(&state));
    }

    #[test]
    fn test_flipped_selected_card_holds() {
        let mut state = fixtures::level_one();
        state.cards_mut()[0].is_flipped = true;
        let id = state.cards()[0].card_id.clone();
        state.selected_mut().push(id);
        assert!(SelectionInvariant::holds(&state));
    }
}
