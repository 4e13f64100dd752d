//! Demand oracle and excess-demand evaluation.
//!
//! The oracle answers "what does each student buy at these prices?" by
//! ranking every bundle up to the student's capacity and taking the best
//! affordable one. The excess-demand evaluator aggregates those purchases
//! into per-course over/under-subscription, the signal the price search
//! descends on.

mod enumeration;
mod excess;
mod oracle;

pub use enumeration::{BundleEnumerator, ExactEnumerator};
pub use excess::{clip_at_price_floor, clipped_excess_demand, demand_error, excess_demand};
pub use oracle::DemandOracle;
