//! Difficulty curve: how many pairs a level deals and how many misses it tolerates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Pairs dealt at level 1.
pub const BASE_PAIRS: u32 = 8;

/// Upper bound on pairs per level (40 cards).
pub const MAX_PAIRS: u32 = 20;

/// Number of pairs dealt at `level`.
///
/// Starts at 8, adds 2 pairs every 2 full levels past level 1, caps at 20.
/// Level 0 is treated as level 1.
pub fn pairs_for_level(level: u32) -> u32 {
    let increment = (level.saturating_sub(1) / 2).saturating_mul(2);
    BASE_PAIRS.saturating_add(increment).min(MAX_PAIRS)
}

/// Move budget at `level`: perfect play plus a shrinking buffer.
pub fn max_moves_for_level(level: u32, pairs_needed: u32) -> u32 {
    pairs_needed.saturating_add(move_buffer(level))
}

/// Extra moves allowed beyond perfect play.
pub fn move_buffer(level: u32) -> u32 {
    match level {
        0..=3 => 15,
        4..=6 => 12,
        7..=10 => 9,
        _ => 6,
    }
}

/// Sizing of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Level number (>= 1).
    pub level: u32,
    /// Matches required to win.
    pub pairs_needed: u32,
    /// Non-matching moves allowed before the level is lost.
    pub max_moves: u32,
}

impl LevelSpec {
    /// Sizes `level` (0 is clamped to 1).
    #[instrument]
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let pairs_needed = pairs_for_level(level);
        Self {
            level,
            pairs_needed,
            max_moves: max_moves_for_level(level, pairs_needed),
        }
    }

    /// Number of cards on the board.
    pub fn card_count(&self) -> usize {
        self.pairs_needed as usize * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one() {
        let spec = LevelSpec::for_level(1);
        assert_eq!(spec.pairs_needed, 8);
        assert_eq!(spec.max_moves, 23);
        assert_eq!(spec.card_count(), 16);
    }

    #[test]
    fn test_pairs_table() {
        let table: Vec<u32> = (1..=14).map(pairs_for_level).collect();
        assert_eq!(table, [8, 8, 10, 10, 12, 12, 14, 14, 16, 16, 18, 18, 20, 20]);
        assert_eq!(pairs_for_level(100), 20);
        assert_eq!(pairs_for_level(u32::MAX), 20);
    }

    #[test]
    fn test_buffer_steps() {
        assert_eq!(max_moves_for_level(3, 10), 25);
        assert_eq!(max_moves_for_level(4, 10), 22);
        assert_eq!(max_moves_for_level(6, 12), 24);
        assert_eq!(max_moves_for_level(7, 14), 23);
        assert_eq!(max_moves_for_level(10, 16), 25);
        assert_eq!(max_moves_for_level(11, 18), 24);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(LevelSpec::for_level(0), LevelSpec::for_level(1));
    }

    proptest! {
        #[test]
        fn prop_pairs_bounded_and_monotonic(level in 1u32..10_000) {
            prop_assert!(pairs_for_level(level) <= MAX_PAIRS);
            prop_assert!(pairs_for_level(level) >= BASE_PAIRS);
            prop_assert!(pairs_for_level(level) <= pairs_for_level(level + 1));
        }

        #[test]
        fn prop_budget_never_below_perfect_play(level in 1u32..10_000) {
            let spec = LevelSpec::for_level(level);
            prop_assert!(spec.max_moves >= spec.pairs_needed);
        }
    }
}
