//! Shared slicing and sampling helpers for the query services.

use rand::seq::index::sample as sample_indices;
use rand::RngCore;

/// Plain `[offset, offset + size)` slice. An offset past the end yields an
/// empty list, never an error.
pub fn page<T>(items: Vec<T>, size: usize, offset: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(size).collect()
}

/// Search windowing: when `count * offset` reaches the total the window is
/// empty, otherwise the slice `[count * offset, min(total, count * offset + count))`.
pub fn window<T>(items: Vec<T>, count: usize, offset: usize) -> Vec<T> {
    let start = count.saturating_mul(offset);
    if start >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(start).take(count).collect()
}

/// Uniform sample without replacement of `min(amount, len)` items.
pub fn sample<T>(items: Vec<T>, amount: usize, rng: &mut dyn RngCore) -> Vec<T> {
    let amount = amount.min(items.len());
    if amount == 0 {
        return Vec::new();
    }
    let indices = sample_indices(rng, items.len(), amount);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    indices
        .iter()
        .map(|i| slots[i].take().unwrap())
        .collect()
}
