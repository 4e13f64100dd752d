//! Linear price constraints over bundles.

use crate::instance::Bundle;

/// Direction of an [`EquivalenceConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    /// Bundle price must not exceed the threshold (affordability).
    AtMost,
    /// Bundle price must reach at least the threshold (unaffordability of
    /// a dominating alternative).
    AtLeast,
}

/// A predicate `sum(prices[i] for i in bundle) <= threshold` (or `>=`).
///
/// An explicit value type rather than a closure, so memories can be
/// inspected, compared, and serialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquivalenceConstraint {
    /// Item set whose prices are summed.
    pub bundle: Bundle,
    /// Direction of the comparison.
    pub comparator: Comparator,
    /// Budget threshold the bundle price is compared against.
    pub threshold: f64,
}

impl EquivalenceConstraint {
    /// Affordability constraint: bundle price `<= threshold`.
    pub fn at_most(bundle: Bundle, threshold: f64) -> Self {
        Self {
            bundle,
            comparator: Comparator::AtMost,
            threshold,
        }
    }

    /// Dominance constraint: bundle price `>= threshold`.
    pub fn at_least(bundle: Bundle, threshold: f64) -> Self {
        Self {
            bundle,
            comparator: Comparator::AtLeast,
            threshold,
        }
    }

    /// Whether the constraint holds at the given prices, within
    /// `tolerance` to avoid floating-point false negatives at the
    /// boundary.
    pub fn holds(&self, prices: &[f64], tolerance: f64) -> bool {
        let total: f64 = self.bundle.iter().map(|&item| prices[item]).sum();
        match self.comparator {
            Comparator::AtMost => total <= self.threshold + tolerance,
            Comparator::AtLeast => total >= self.threshold - tolerance,
        }
    }
}
