//! Candidate-bundle enumeration strategies.

use crate::instance::{Bundle, ItemId};

/// Produces the candidate bundles considered for one agent.
///
/// The exhaustive strategy is exponential in `max_size`; keeping it behind
/// a trait lets callers swap in a pruned or heuristic enumeration without
/// touching the oracle or the constraint derivation, which must agree on
/// the same candidate space.
pub trait BundleEnumerator: Send + Sync {
    /// All candidate bundles drawn from `items` with `1 <= len <= max_size`.
    ///
    /// Bundles must be sorted ascending and emitted in a deterministic
    /// order. The empty bundle is never emitted; it is the oracle's
    /// fallback, not a candidate.
    fn enumerate(&self, items: &[ItemId], max_size: usize) -> Vec<Bundle>;
}

/// Exhaustive enumeration: every subset of `items` of each size from 1 up
/// to `max_size`, in ascending size then lexicographic order.
///
/// Emits `sum(C(n, k) for k in 1..=max_size)` bundles for `n` items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactEnumerator;

impl BundleEnumerator for ExactEnumerator {
    fn enumerate(&self, items: &[ItemId], max_size: usize) -> Vec<Bundle> {
        let n = items.len();
        let mut bundles = Vec::new();
        for size in 1..=max_size.min(n) {
            // Standard next-combination walk over index vectors.
            let mut idx: Vec<usize> = (0..size).collect();
            loop {
                bundles.push(idx.iter().map(|&i| items[i]).collect());
                let mut i = size;
                while i > 0 && idx[i - 1] == n - size + (i - 1) {
                    i -= 1;
                }
                if i == 0 {
                    break;
                }
                idx[i - 1] += 1;
                for j in i..size {
                    idx[j] = idx[j - 1] + 1;
                }
            }
        }
        bundles
    }
}
