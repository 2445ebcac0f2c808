//! Session phases derived from the state.

use serde::{Deserialize, Serialize};

/// Where a session stands in its selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// No card selected.
    Idle,
    /// One card face up, waiting for the second.
    OneSelected,
    /// Two cards face up, resolution pending.
    Resolving,
    /// Every pair matched.
    Won,
    /// Move budget spent.
    Lost,
}

impl Phase {
    /// Returns true if the phase accepts card selections.
    pub fn accepts_selection(self) -> bool {
        matches!(self, Phase::Idle | Phase::OneSelected)
    }

    /// Returns the outcome for terminal phases.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Won => Some(Outcome::Won),
            Phase::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }
}

/// Outcome of a finished level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// All pairs matched within budget.
    Won,
    /// Ran out of moves.
    Lost,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won => write!(f, "You win!"),
            Outcome::Lost => write!(f, "Game over! Out of moves"),
        }
    }
}
