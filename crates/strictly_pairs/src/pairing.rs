//! Pairing builder: turns distinct content into a shuffled deck of pairs.

use crate::shuffle::shuffle;
use crate::types::{Card, CardContent};
use rand::Rng;
use tracing::{debug, instrument};

/// Builds two face-down cards per content item and shuffles them.
///
/// The caller is responsible for passing distinct content; duplicates are
/// not detected here.
#[instrument(skip(contents, rng), fields(pairs = contents.len()))]
pub fn build_cards<R>(contents: &[CardContent], rng: &mut R) -> Vec<Card>
where
    R: Rng + ?Sized,
{
    let mut cards: Vec<Card> = contents
        .iter()
        .flat_map(|content| [Card::face_down(content, 1), Card::face_down(content, 2)])
        .collect();

    shuffle(&mut cards, rng);
    debug!(cards = cards.len(), "Built shuffled card set");
    cards
}
