//! Progress invariants: match accounting and terminal outcomes.

use super::Invariant;
use crate::rules;
use crate::state::SessionState;

/// Invariant: matches never exceed pairs needed, and the matched cards on
/// the board are exactly the matched pairs.
pub struct MatchCountInvariant;

impl Invariant<SessionState> for MatchCountInvariant {
    fn holds(state: &SessionState) -> bool {
        let matched_cards = state.cards().iter().filter(|c| c.is_matched).count();
        state.matches() <= state.pairs_needed() && matched_cards == 2 * state.matches() as usize
    }

    fn description() -> &'static str {
        "Matched cards account for exactly the recorded matches"
    }
}

/// Invariant: won iff every pair matched, lost iff out of moves and not
/// won, never both.
pub struct OutcomeInvariant;

impl Invariant<SessionState> for OutcomeInvariant {
    fn holds(state: &SessionState) -> bool {
        let won = rules::is_won(state.matches(), state.pairs_needed());
        let lost = rules::is_lost(state.moves(), state.max_moves(), won);
        state.is_won() == won && state.is_lost() == lost && !(state.is_won() && state.is_lost())
    }

    fn description() -> &'static str {
        "Won and lost flags agree with matches and moves"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures;

    #[test]
    fn test_fresh_state_holds() {
        let state = fixtures::level_one();
        assert!(MatchCountInvariant::holds(&state));
        assert!(OutcomeInvariant::holds(&state));
    }

    #[test]
    fn test_match_without_matched_cards_violates() {
        let mut state = fixtures::level_one();
        let (_, matches, _, _) = state.counters_mut();
        *matches = 1;
        assert!(!MatchCountInvariant::holds(&state));
    }

    #[test]
    fn test_premature_win_violates() {
        let mut state = fixtures::level_one();
        let (_, _, won, _) = state.counters_mut();
        *won = true;
        assert!(!OutcomeInvariant::holds(&state));
    }

    #[test]
    fn test_exhausted_budget_must_be_lost() {
        let mut state = fixtures::level_one();
        let max = state.max_moves();
        let (moves, _, _, _) = state.counters_mut();
        *moves = max;
        assert!(!OutcomeInvariant::holds(&state));

        let (_, _, _, lost) = state.counters_mut();
        *lost = true;
        assert!(OutcomeInvariant::holds(&state));
    }
}
