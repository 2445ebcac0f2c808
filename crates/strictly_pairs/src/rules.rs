//! Game rules for pairs.
//!
//! Pure functions over cards and counters, kept apart from the session so
//! contracts and invariants can reuse them.

use crate::types::Card;

/// Two revealed cards form a pair: same content, different card instances.
pub fn is_match(a: &Card, b: &Card) -> bool {
    a.content_id == b.content_id && a.card_id != b.card_id
}

/// The level is won once every pair has been matched.
pub fn is_won(matches: u32, pairs_needed: u32) -> bool {
    matches == pairs_needed
}

/// The level is lost once the move budget is spent without winning.
pub fn is_lost(moves: u32, max_moves: u32, won: bool) -> bool {
    moves >= max_moves && !won
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardContent;

    fn pair(id: &str) -> (Card, Card) {
        let content = CardContent::new(id, id, "img");
        (Card::face_down(&content, 1), Card::face_down(&content, 2))
    }

    #[test]
    fn test_copies_of_same_content_match() {
        let (a, b) = pair("zelda");
        assert!(is_match(&a, &b));
        assert!(is_match(&b, &a));
    }

    #[test]
    fn test_different_content_does_not_match() {
        let (a, _) = pair("zelda");
        let (c, _) = pair("metroid");
        assert!(!is_match(&a, &c));
        assert!(!is_match(&c, &a));
    }

    #[test]
    fn test_card_never_matches_itself() {
        let (a, _) = pair("zelda");
        assert!(!is_match(&a, &a));
    }

    #[test]
    fn test_win_takes_precedence_over_loss() {
        let won = is_won(8, 8);
        assert!(won);
        assert!(!is_lost(23, 23, won));
        assert!(is_lost(23, 23, false));
        assert!(!is_lost(22, 23, false));
    }
}
