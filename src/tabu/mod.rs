//! Equivalence-region tracking (the tabu memory).
//!
//! Each visited allocation pins down a region of price space that would
//! reproduce it: the allocated bundles must stay affordable, and every
//! at-least-as-valuable alternative must stay unaffordable. Those regions
//! are recorded as linear price constraints; a candidate price vector
//! satisfying every constraint of some recorded region would reproduce an
//! allocation already evaluated, and is excluded from selection.
//!
//! # References
//!
//! - Budish et al. (2023), Algorithm 3: the history set `H` of prices
//!   equivalent to a visited vector.
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing*
//!   1(3), 190-206.

mod constraint;
mod memory;

pub use constraint::{Comparator, EquivalenceConstraint};
pub use memory::{derive_constraints, TabuMemory};
