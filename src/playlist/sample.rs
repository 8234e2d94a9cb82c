//! Uniform random selection helpers.
//!
//! These draw from the thread-local RNG, which is not `Send`; callers pick
//! their indices before awaiting anything.

use rand::seq::SliceRandom;
use rand::Rng;

/// Up to `amount` distinct indices into a list of `len`, in random order.
pub fn sample_indices(len: usize, amount: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(&mut rand::rng());
    indices.truncate(amount);
    indices
}

/// Exactly `amount` indices into a non-empty list of `len`.
///
/// Draws without replacement in rounds: every index appears once before any
/// index repeats. Returns nothing for an empty list.
pub fn padded_indices(len: usize, amount: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(amount);
    while indices.len() < amount {
        let remaining = amount - indices.len();
        indices.extend(sample_indices(len, remaining));
    }
    indices
}

/// A random index into a list of `len`, or `None` when it is empty.
pub fn pick_index(len: usize) -> Option<usize> {
    (len > 0).then(|| rand::rng().random_range(0..len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_indices_short_list() {
        let mut indices = sample_indices(2, 5);
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_padded_indices_empty() {
        assert!(padded_indices(0, 5).is_empty());
        assert_eq!(pick_index(0), None);
    }

    #[test]
    fn test_padded_indices_rounds() {
        let indices = padded_indices(2, 5);
        assert_eq!(indices.len(), 5);
        // Each round of two covers both entries
        let first: HashSet<_> = indices[0..2].iter().collect();
        let second: HashSet<_> = indices[2..4].iter().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
    }

    proptest! {
        #[test]
        fn sample_is_distinct_and_in_range(len in 0usize..20, amount in 0usize..20) {
            let indices = sample_indices(len, amount);
            prop_assert_eq!(indices.len(), len.min(amount));
            let unique: HashSet<_> = indices.iter().collect();
            prop_assert_eq!(unique.len(), indices.len());
            prop_assert!(indices.iter().all(|&i| i < len));
        }

        #[test]
        fn pick_is_in_range(len in 1usize..50) {
            let index = pick_index(len).unwrap();
            prop_assert!(index < len);
        }
    }
}
