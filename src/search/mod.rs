//! The price-adjustment search loop.
//!
//! # Algorithm
//!
//! 1. Sample initial prices
//! 2. At each iteration:
//!    a. Query the demand oracle, compute the clipped excess-demand norm
//!    b. Zero norm: the market clears, terminate with success
//!    c. Record the current equivalence region in the tabu memory
//!    d. Generate non-tabu neighbor prices (gradient + per-item steps)
//!    e. Move to the neighbor with minimum market-clearing error
//! 3. Surface exhaustion (iteration cap, or no eligible neighbor) as an
//!    explicit error, never an infinite loop
//!
//! # References
//!
//! Budish, Gao, Othman, Rubinstein, Zhang (2023). "Practical Algorithms and
//! Experimentally Validated Incentives for Equilibrium-based Fair Division
//! (A-CEEI)", Algorithm 3.

mod config;
mod neighbors;
mod runner;

pub use config::SearchConfig;
pub use neighbors::{generate_neighbors, gradient_neighbor, select_min_error, Selected};
pub use runner::{
    sample_budgets, ExhaustedReason, SearchError, SearchResult, SearchRunner,
};
