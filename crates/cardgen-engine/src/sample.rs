//! Uniform random sampling of card identifier sets.
//!
//! The sampling step shuffles the full match set in place and truncates to
//! the requested count, so the selection is an unbiased draw without
//! replacement.

use rand::Rng;

/// Shuffle a slice in place with the Fisher-Yates algorithm.
///
/// For index i from the last element down to 1, swaps with a uniformly
/// chosen index in [0, i]. Every permutation is equally likely given a
/// uniform RNG.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw up to `count` identifiers uniformly at random, without replacement.
///
/// Returns exactly `min(ids.len(), count)` identifiers. Only the local
/// working copy is reordered.
///
/// # Example
///
/// ```
/// use cardgen_engine::sample::take_sample;
///
/// let ids = vec![1, 2, 3, 4, 5];
/// let picked = take_sample(ids, 2, &mut rand::rng());
/// assert_eq!(picked.len(), 2);
/// ```
pub fn take_sample(mut ids: Vec<i64>, count: usize, rng: &mut impl Rng) -> Vec<i64> {
    shuffle(&mut ids, rng);
    ids.truncate(count);
    ids
}
