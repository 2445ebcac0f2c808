//! First-class invariants for a pairs session.
//!
//! Invariants are logical properties that must hold after every
//! transition. The session checks them in debug builds; tests check them
//! directly.

mod board;
mod progress;
mod selection;

pub use board::{CardCountInvariant, PairedContentInvariant, UniqueCardIdsInvariant};
pub use progress::{MatchCountInvariant, OutcomeInvariant};
pub use selection::SelectionInvariant;

use crate::state::SessionState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to six invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);

/// Every session invariant as one composable set.
pub type SessionInvariants = (
    CardCountInvariant,
    UniqueCardIdsInvariant,
    PairedContentInvariant,
    SelectionInvariant,
    MatchCountInvariant,
    OutcomeInvariant,
);

/// Checks every session invariant, joining violations into one message.
pub fn check_session(state: &SessionState) -> Result<(), String> {
    SessionInvariants::check_all(state).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::difficulty::LevelSpec;
    use crate::pairing::build_cards;
    use crate::state::SessionState;
    use crate::types::CardContent;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A fresh level-1 state with deterministic shuffling.
    pub fn level_one() -> SessionState {
        let spec = LevelSpec::for_level(1);
        let contents: Vec<CardContent> = (0..spec.pairs_needed)
            .map(|i| CardContent::new(format!("g{i}"), format!("Game {i}"), "img"))
            .collect();
        let cards = build_cards(&contents, &mut StdRng::seed_from_u64(11));
        SessionState::new(spec, cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_set_holds_for_fresh_state() {
        let state = fixtures::level_one();
        assert!(SessionInvariants::check_all(&state).is_ok());
        assert!(check_session(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = fixtures::level_one();
        state.cards_mut().pop();
        let (_, matches, _, _) = state.counters_mut();
        *matches = 99;

        let violations = SessionInvariants::check_all(&state).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&CardCountInvariant::description()));
        assert!(descriptions.contains(&MatchCountInvariant::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let state = fixtures::level_one();
        type TwoInvariants = (CardCountInvariant, SelectionInvariant);
        assert!(TwoInvariants::check_all(&state).is_ok());
    }
}
