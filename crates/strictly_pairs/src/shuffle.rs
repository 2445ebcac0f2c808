//! Fisher-Yates shuffling.

use rand::Rng;

/// Shuffles `items` in place into a uniformly random permutation.
///
/// Walks the slice from the back, swapping each position with a uniformly
/// chosen position at or before it.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy of `items`, leaving the input untouched.
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_empty_and_single_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_same_seed_same_order() {
        let input: Vec<u32> = (0..40).collect();
        let a = shuffled(&input, &mut StdRng::seed_from_u64(77));
        let b = shuffled(&input, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_orderings_of_three_appear() {
        // 6 orderings, 6000 draws: each should land near 1000.
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffled(&[1u8, 2, 3], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (order, count) in counts {
            assert!((800..1200).contains(&count), "{:?} drawn {} times", order, count);
        }
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_a_permutation(items in proptest::collection::vec(0u16..50, 0..40), seed in any::<u64>()) {
            let out = shuffled(&items, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(out.len(), items.len());

            let mut sorted_in = items.clone();
            let mut sorted_out = out;
            sorted_in.sort_unstable();
            sorted_out.sort_unstable();
            prop_assert_eq!(sorted_in, sorted_out);
        }
    }
}
