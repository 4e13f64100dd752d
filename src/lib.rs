//! Tabu-search price equilibrium engine for course-seat allocation.
//!
//! Course seats are indivisible, students have valuations over seat bundles
//! (additive in the bundled [`TableInstance`], arbitrary via the [`Instance`]
//! trait), per-student bundle-size caps, and per-course seat caps. The engine
//! searches for an approximate competitive equilibrium: a price vector under
//! which every student's utility-maximizing affordable bundle collectively
//! respects all seat caps (zero clipped excess demand).
//!
//! # Algorithm
//!
//! 1. Draw initial prices uniformly from `[1, 1 + beta]` per item
//! 2. At each iteration:
//!    a. Compute every student's best affordable bundle (demand oracle)
//!    b. If the clipped excess-demand norm is zero, terminate with success
//!    c. Record the equivalence region of the current allocation as linear
//!       price constraints in the tabu memory
//!    d. Generate neighbor price vectors (one gradient step plus per-item
//!       adjustments), discarding any vector the memory excludes
//!    e. Move to the neighbor with the smallest clipped excess-demand norm
//! 3. Fail explicitly once the iteration cap is hit or no eligible
//!    neighbor remains
//!
//! Per-student bundle enumeration is exponential in the student's capacity
//! (`C(num_items, capacity)` candidates per size), which makes the engine
//! practical for small instances only. The enumeration is pluggable via
//! [`demand::BundleEnumerator`] so a pruned or heuristic strategy can be
//! substituted without touching the search.
//!
//! # References
//!
//! - Budish, E., Gao, R., Othman, A., Rubinstein, A., Zhang, Q. (2023).
//!   "Practical Algorithms and Experimentally Validated Incentives for
//!   Equilibrium-based Fair Division (A-CEEI)", Algorithm 3 (tabu search).
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing*
//!   1(3), 190-206.

pub mod demand;
pub mod instance;
pub mod search;
pub mod tabu;

pub use instance::{AgentId, Allocation, Bundle, Instance, ItemId, TableInstance};
pub use search::{sample_budgets, SearchConfig, SearchError, SearchResult, SearchRunner};
pub use tabu::{Comparator, EquivalenceConstraint, TabuMemory};
