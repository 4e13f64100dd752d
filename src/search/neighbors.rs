//! Neighbor generation and selection.

use rayon::prelude::*;
use tracing::trace;

use super::config::SearchConfig;
use crate::demand::{clipped_excess_demand, demand_error, BundleEnumerator, DemandOracle};
use crate::instance::{Allocation, Instance, ItemId};
use crate::tabu::TabuMemory;

/// The gradient neighbor: `max(0, p + delta * z)` component-wise, with `z`
/// the raw (unclipped) excess-demand vector.
pub fn gradient_neighbor(prices: &[f64], delta: f64, excess: &[i64]) -> Vec<f64> {
    prices
        .iter()
        .zip(excess)
        .map(|(&price, &z)| (price + delta * z as f64).max(0.0))
        .collect()
}

/// Generates the candidate set for one iteration, already filtered against
/// the tabu memory and deduplicated. Order is significant for tie-breaking
/// in selection: the gradient candidate comes first, then per-item
/// adjustments in item order.
///
/// Per-item adjustments, driven by the clipped excess demand:
/// - over-demanded item: raise its price by unit steps (at most
///   `adjustment_step_limit`) until a non-tabu vector is found whose
///   allocation differs from the current one in exactly one agent's bundle
///   with that agent dropping the item; the first such vector is accepted
///   and the item is done. Exhausting the step budget without a hit simply
///   contributes no candidate.
/// - under-demanded item: propose zeroing its price.
#[allow(clippy::too_many_arguments)]
pub fn generate_neighbors<I: Instance, E: BundleEnumerator>(
    instance: &I,
    oracle: &DemandOracle<E>,
    memory: &TabuMemory,
    prices: &[f64],
    budgets: &[f64],
    allocation: &Allocation,
    raw_excess: &[i64],
    clipped_excess: &[i64],
    config: &SearchConfig,
) -> Vec<Vec<f64>> {
    let mut neighbors: Vec<Vec<f64>> = Vec::new();

    let gradient = gradient_neighbor(prices, config.delta, raw_excess);
    if !memory.is_excluded(&gradient) {
        neighbors.push(gradient);
    }

    for (item, &z) in clipped_excess.iter().enumerate() {
        if z > 0 {
            let mut candidate = prices.to_vec();
            for _ in 0..config.adjustment_step_limit {
                candidate[item] += 1.0;
                if memory.is_excluded(&candidate) {
                    continue;
                }
                let next = oracle.demand(instance, &candidate, budgets);
                if drops_item_for_one_agent(allocation, &next, item) {
                    trace!(item, price = candidate[item], "adjustment neighbor found");
                    push_unique(&mut neighbors, candidate);
                    break;
                }
            }
        } else if z < 0 {
            let mut candidate = prices.to_vec();
            candidate[item] = 0.0;
            if !memory.is_excluded(&candidate) {
                push_unique(&mut neighbors, candidate);
            }
        }
    }

    neighbors
}

/// Whether `next` differs from `current` in exactly one agent's bundle,
/// and that agent held `item` before but not after.
fn drops_item_for_one_agent(current: &Allocation, next: &Allocation, item: ItemId) -> bool {
    let mut changed = None;
    for (agent, (before, after)) in current.iter().zip(next).enumerate() {
        if before != after {
            if changed.is_some() {
                return false;
            }
            changed = Some(agent);
        }
    }
    match changed {
        Some(agent) => current[agent].contains(&item) && !next[agent].contains(&item),
        None => false,
    }
}

fn push_unique(neighbors: &mut Vec<Vec<f64>>, candidate: Vec<f64>) {
    if !neighbors.contains(&candidate) {
        neighbors.push(candidate);
    }
}

/// A candidate chosen by [`select_min_error`], with the evaluation it won
/// on, so the runner does not re-query the oracle.
#[derive(Debug, Clone)]
pub struct Selected {
    /// The winning price vector.
    pub prices: Vec<f64>,
    /// Allocation the demand oracle produced at those prices.
    pub allocation: Allocation,
    /// Clipped excess-demand L2 norm at those prices.
    pub error: f64,
}

/// Evaluates every candidate through the demand oracle and picks the one
/// with the strictly smallest clipped excess-demand norm; ties go to the
/// earliest-generated candidate.
pub fn select_min_error<I: Instance, E: BundleEnumerator>(
    instance: &I,
    oracle: &DemandOracle<E>,
    budgets: &[f64],
    candidates: Vec<Vec<f64>>,
    tolerance: f64,
    parallel: bool,
) -> Option<Selected> {
    let evaluate = |prices: Vec<f64>| -> Selected {
        let allocation = oracle.demand(instance, &prices, budgets);
        let error = demand_error(&clipped_excess_demand(
            instance,
            &prices,
            &allocation,
            tolerance,
        ));
        Selected {
            prices,
            allocation,
            error,
        }
    };

    let evaluated: Vec<Selected> = if parallel {
        candidates.into_par_iter().map(evaluate).collect()
    } else {
        candidates.into_iter().map(evaluate).collect()
    };

    evaluated
        .into_iter()
        .enumerate()
        .min_by(|(i, a), (j, b)| a.error.total_cmp(&b.error).then(i.cmp(j)))
        .map(|(_, selected)| selected)
}
